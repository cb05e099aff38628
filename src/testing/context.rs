use crate::*;
use std::path::PathBuf;
use test_context::AsyncTestContext;
pub use test_context::test_context;

/// A fresh, uniquely named directory under the system temp dir, removed on
/// teardown. Not created up front.
pub struct TempUsageDir {
    pub dir: PathBuf,
}

impl TempUsageDir {
    fn random_name() -> String {
        use rand::Rng;
        format!(
            "qsense_test_{}",
            rand::rng()
                .sample_iter(&rand::distr::Alphanumeric)
                .take(8)
                .map(char::from)
                .collect::<String>()
                .to_lowercase()
        )
    }
}

impl AsyncTestContext for TempUsageDir {
    async fn setup() -> Self {
        crate::testing::common_init();
        Self {
            dir: std::env::temp_dir().join(Self::random_name()),
        }
    }

    async fn teardown(self) {
        match tokio::fs::remove_dir_all(&self.dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove {}: {e}", self.dir.display()),
        }
    }
}

mod temp_usage_dir_tests {
    use super::*;

    #[test_context(TempUsageDir)]
    #[tokio::test]
    async fn starts_absent(ctx: &mut TempUsageDir) {
        assert!(!ctx.dir.exists());
        assert!(ctx.dir.starts_with(std::env::temp_dir()));
    }

    #[test_context(TempUsageDir)]
    #[tokio::test]
    async fn file_store_writes_inside(ctx: &mut TempUsageDir) -> Result {
        let store = FileStore::new(&ctx.dir);
        store.set("k", "v".into()).await?;
        assert!(ctx.dir.is_dir());
        Ok(())
    }
}

reexport!(testing, test);
reexport!(error);
reexport!(config);
reexport!(sql);
reexport!(metadata);
reexport!(usage);
reexport!(autocomplete);
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn};

use tokio::io::AsyncReadExt as _;
use tracing_subscriber::EnvFilter;

/// Reads a query from stdin and prints ranked completions for its end.
///
/// Usage: `qsense [schema.json] [database]`. Usage counts for the `cli`
/// connection are kept under the configured usage directory.
#[tokio::main]
async fn main() -> Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()) // <- reads RUST_LOG
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let schema = match args.next() {
        Some(path) => Schema::from_json(&tokio::fs::read_to_string(&path).await?)?,
        None => Schema::new(),
    };
    let selected_database = args.next();

    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;
    let sql = input.trim_end_matches(['\r', '\n']);

    let provider = StaticProvider::new(schema).with_keywords(Keyword::ALL.map(Keyword::as_str));
    let mut completer = Completer::new(
        MetadataCache::new(provider),
        UsageTracker::new(FileStore::from_config()),
    );
    completer.switch_connection("cli").await;

    let completion = completer
        .complete(sql, sql.len(), selected_database.as_deref())
        .await;
    let context = &completion.context;
    info!(
        "clause={} word={:?} after_dot={} tables={:?}",
        context.clause_type,
        context.current_word,
        context.is_after_dot,
        context
            .visible_tables()
            .iter()
            .map(|r| r.table.as_str())
            .collect::<Vec<_>>()
    );

    for item in &completion.items {
        let suggestion = &item.suggestion;
        match &suggestion.detail {
            Some(detail) => println!(
                "{}\t{}\t{}\t{detail}",
                item.sort_text, suggestion.category, suggestion.label
            ),
            None => println!(
                "{}\t{}\t{}",
                item.sort_text, suggestion.category, suggestion.label
            ),
        }
    }
    Ok(())
}

#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}

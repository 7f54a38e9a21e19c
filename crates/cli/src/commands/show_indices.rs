//! `show-indices` command: print the selection a filter list produces.

use anyhow::Result;
use curator_config::Config;
use curator_engine::{ActionError, FilterSpec, IndexList, describe};
use serde_json::Value;

/// Parse `--filter-list`. A single mapping is treated as a one-element list.
pub(crate) fn parse_filter_list(raw: &str) -> Result<Vec<FilterSpec>, ActionError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| {
        ActionError::Configuration(format!("--filter-list is not valid JSON: {e}"))
    })?;
    let value = match value {
        Value::Object(_) => Value::Array(vec![value]),
        other => other,
    };
    FilterSpec::parse_list(&value, "--filter-list")
}

pub async fn run(config: &Config, filter_list: &str, verbose: bool) -> Result<()> {
    let filters = parse_filter_list(filter_list)?;
    let client = super::connect(config).await?;

    let mut ilo = IndexList::new(client).await?;
    ilo.iterate_filters(&filters)?;

    if verbose {
        println!("{}", serde_json::to_string_pretty(&describe(&ilo))?);
    } else {
        for index in ilo.indices() {
            println!("{index}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_engine::ErrorKind;

    #[test]
    fn test_single_mapping_is_wrapped() {
        let filters = parse_filter_list(r#"{"filtertype":"closed"}"#).unwrap();
        assert_eq!(filters, vec![FilterSpec::Closed { exclude: true }]);
    }

    #[test]
    fn test_invalid_json_is_configuration_error() {
        let err = parse_filter_list("[{").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_unknown_filtertype_is_rejected() {
        let err = parse_filter_list(r#"[{"filtertype":"space"}]"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}

//! End-of-run output on stdout

use colnorm_core::{Configuration, RunSummary};
use serde_json::json;
use std::path::Path;

/// The `--json` document: the configuration that ran and its summary
pub fn json_report(config: &Configuration, summary: &RunSummary) -> serde_json::Result<String> {
    let report = json!({
        "configuration": serde_json::to_value(config)?,
        "summary": serde_json::to_value(summary)?,
    });
    serde_json::to_string_pretty(&report)
}

/// Plain-text summary lines
pub fn text_report(summary: &RunSummary, output: &Path) -> String {
    let header = if summary.header_written {
        " (header included)"
    } else {
        ""
    };
    format!(
        "\nWrote {} rows to {}{}\nNormalized {} fields\nDone. Bye!\n",
        summary.rows_written,
        output.display(),
        header,
        summary.fields_transformed
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use colnorm_core::{parse_columns, Toggles};
    use serde_json::Value;

    fn config() -> Configuration {
        Configuration::new("in.tsv", "out.tsv", b'\t', parse_columns("1,0").unwrap())
            .with_header(true)
            .with_toggles(Toggles {
                lowercase: true,
                ..Toggles::default()
            })
    }

    #[test]
    fn test_json_report_carries_configuration() {
        let summary = RunSummary {
            rows_read: 3,
            rows_written: 3,
            header_written: true,
            fields_transformed: 4,
        };

        let report: Value = serde_json::from_str(&json_report(&config(), &summary).unwrap()).unwrap();

        let configuration = &report["configuration"];
        assert_eq!(configuration["input"], "in.tsv");
        assert_eq!(configuration["delimiter"], "\t");
        assert_eq!(configuration["columns"], json!([1, 0]));
        assert_eq!(configuration["has_header"], true);
        assert_eq!(configuration["toggles"]["lowercase"], true);
        assert_eq!(configuration["toggles"]["no_emails"], false);
        assert_eq!(report["summary"]["rows_written"], 3);
        assert_eq!(report["summary"]["fields_transformed"], 4);
    }

    #[test]
    fn test_text_report() {
        let summary = RunSummary {
            rows_written: 2,
            header_written: true,
            fields_transformed: 1,
            ..RunSummary::default()
        };

        let text = text_report(&summary, Path::new("out.tsv"));

        assert_eq!(
            text,
            "\nWrote 2 rows to out.tsv (header included)\nNormalized 1 fields\nDone. Bye!\n"
        );
    }
}

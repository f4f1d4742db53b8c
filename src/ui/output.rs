//! Output formatting and display logic for streamsup

use crate::config::Config;
use crate::core::types::RunSummary;
use crate::validation::{StreamKind, ValidationTrace};

/// Display configuration information in a user-friendly format
pub fn display_config_info(config: &Config) {
    println!("> Using batch size: {}", config.effective_batch_size());
    println!(
        "> Using probe timeout (seconds): {}",
        config.timeout_duration().as_secs()
    );
    println!(
        "> Using batch delay (ms): {}",
        config.batch_delay_duration().as_millis()
    );
    if let Some(ref api_url) = config.api_url {
        println!("> Station store: {api_url}");
    }
    println!();
}

/// Display the terminal summary for one fleet run
pub fn display_run_summary(summary: &RunSummary) {
    println!("\n> Summary");
    println!("   Online:  {}", summary.valid);
    println!("   Offline: {}", summary.invalid);
    println!("   Checked: {}", summary.processed);

    if summary.has_offline() {
        println!("\n{} station(s) offline", summary.invalid);
    } else {
        println!("\nAll stations online!");
    }
}

/// Display every intermediate decision of a single-URI check
pub fn display_single_check(url: &str, trace: &ValidationTrace) {
    println!("> Checking {url}");
    println!(
        "Initial check: {}",
        if trace.initial_reachable { "OK" } else { "FAIL" }
    );

    if trace.initial_reachable {
        match trace.kind {
            StreamKind::Direct => println!("Direct stream, no manifest to resolve"),
            StreamKind::Hls => {
                println!("Detected HLS manifest");
                if let Some(count) = trace.entry_count {
                    println!("Found {count} stream URLs");
                }
                if let Some(ref entry) = trace.sampled_entry {
                    println!("Probing first variant: {entry}");
                    println!(
                        "First variant check: {}",
                        if trace.sampled_reachable == Some(true) {
                            "OK"
                        } else {
                            "FAIL"
                        }
                    );
                }
            }
        }
    }

    println!(
        "> Result: {}",
        if trace.is_valid { "valid" } else { "invalid" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(kind: StreamKind) -> ValidationTrace {
        ValidationTrace {
            kind,
            initial_reachable: true,
            entry_count: None,
            sampled_entry: None,
            sampled_reachable: None,
            is_valid: true,
        }
    }

    #[test]
    fn test_display_config_info_does_not_panic() {
        display_config_info(&Config::default());

        let config = Config {
            api_url: Some("https://store.test/rest/v1".to_string()),
            ..Default::default()
        };
        display_config_info(&config);
    }

    #[test]
    fn test_display_run_summary_does_not_panic() {
        display_run_summary(&RunSummary::default());
        display_run_summary(&RunSummary {
            valid: 20,
            invalid: 3,
            processed: 23,
        });
    }

    #[test]
    fn test_display_single_check_variants() {
        display_single_check("https://radio.test/live", &trace(StreamKind::Direct));

        let mut empty_manifest = trace(StreamKind::Hls);
        empty_manifest.entry_count = Some(0);
        empty_manifest.is_valid = false;
        display_single_check("https://radio.test/live.m3u8", &empty_manifest);

        let mut sampled = trace(StreamKind::Hls);
        sampled.entry_count = Some(2);
        sampled.sampled_entry = Some("https://radio.test/low.m3u8".to_string());
        sampled.sampled_reachable = Some(true);
        display_single_check("https://radio.test/live.m3u8", &sampled);

        let mut unreachable = trace(StreamKind::Direct);
        unreachable.initial_reachable = false;
        unreachable.is_valid = false;
        display_single_check("http://127.0.0.1:1/dead", &unreachable);
    }
}

#![no_main]

use hypotest::config::DashboardConfig;
use hypotest::evaluator::Tail;
use hypotest::scenarios::ScenarioCatalog;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsers must return errors, never panic
        let _ = DashboardConfig::from_toml_str(input);
        let _ = ScenarioCatalog::from_toml_str(input);
        let _ = input.parse::<Tail>();
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use peppol_interpreter::ubl::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(path) = s.parse::<Path>() {
            assert_eq!(path.to_string(), s);
        }
    }
});

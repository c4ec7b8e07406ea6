#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(bytes) = peppol_interpreter::pdf::decode_base64(s) {
            let _ = peppol_interpreter::pdf::inspect_pdf(&bytes);
        }
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use peppol_interpreter::loader::{Session, decode_text};

fuzz_target!(|data: &[u8]| {
    let mut session = Session::new();
    if session.load_text(&decode_text(data)).is_ok() {
        // Errors are fine, panics are bugs. At most one handle may be live.
        let _ = session.interpret();
        assert!(session.blobs().live_count() <= 1);
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use votelink_transactions::{Parsed, Transaction};

// Decoding arbitrary bytes must never panic, and anything that decodes must
// re-encode to bytes that decode to the same transaction.
fuzz_target!(|data: &[u8]| {
    if let Ok(Parsed::Standalone(tx)) = Transaction::from_bytes(data, false) {
        let encoded = tx.to_bytes();
        assert_eq!(encoded.len(), data.len());
        let again = Transaction::from_bytes(&encoded, false).expect("re-encoded payload decodes");
        assert_eq!(again, Parsed::Standalone(tx));
    }

    if let Ok(Parsed::Embedded(inner)) = Transaction::from_bytes(data, true) {
        let encoded = inner.transaction().to_embedded_bytes();
        assert_eq!(encoded.len(), data.len());
        let again = Transaction::from_bytes(&encoded, true).expect("re-encoded payload decodes");
        assert_eq!(again.transaction(), inner.transaction());
    }

    // Hex input path: arbitrary text must not panic either.
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = Transaction::from_payload(text, false);
        let _ = Transaction::from_payload(text, true);
    }
});

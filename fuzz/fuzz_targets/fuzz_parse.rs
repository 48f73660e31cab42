#![no_main]

use libfuzzer_sys::fuzz_target;

use land_use_treemap::io::parse_table_from_bytes;
use land_use_treemap::views::{default_views, Extractor};

fuzz_target!(|data: &[u8]| {
    if let Ok(parsed) = parse_table_from_bytes(data, false) {
        assert_eq!(parsed.mapping.num_measurements(), parsed.rows_read);
        let extractor = Extractor::new(&parsed.mapping);
        for extracted in extractor.extract_all(&default_views()) {
            assert!(extracted.num_documents() <= parsed.mapping.num_years());
        }
    }
});

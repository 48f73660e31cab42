#![no_main]

use libfuzzer_sys::fuzz_target;

use land_use_treemap::io::read_mapping_json_from_bytes;

fuzz_target!(|data: &[u8]| {
    let _ = read_mapping_json_from_bytes(data);
});

#![no_main]

use libfuzzer_sys::fuzz_target;

// Anything that decodes must encode, and decode again at the same size
fuzz_target!(|data: &[u8]| {
    if let Ok(raster) = radiant_hdr::decode(data) {
        let encoded = raster.encode().unwrap();
        let again = radiant_hdr::decode(&encoded).unwrap();
        assert_eq!(raster.width(), again.width());
        assert_eq!(raster.height(), again.height());
    }
});

//! Fuzz target: parse arbitrary input as a prefuzz config, resolve it, and
//! render one document from whatever resolves. Must not panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::StdRng;

use prefuzz::config::FuzzConfig;
use prefuzz::document::render;
use prefuzz::sampler::ValueSampler;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let Ok(config) = serde_yaml::from_str::<FuzzConfig>(&text) else {
        return;
    };
    let Ok(specs) = config.resolve() else {
        return;
    };
    let sampled = ValueSampler::with_rng(StdRng::seed_from_u64(0)).sample_all(&specs);
    let _ = render(&sampled);
});

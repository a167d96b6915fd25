#![no_main]

use fuzz_helpers::{run_chunked_fetch_once, ChunkedFetchInput};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: ChunkedFetchInput| {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("current-thread runtime");
    runtime.block_on(async {
        if let Err(e) = run_chunked_fetch_once(&input).await {
            panic!("Fuzz iteration failed: {}\nInput: {:?}", e, input);
        }
    });
});

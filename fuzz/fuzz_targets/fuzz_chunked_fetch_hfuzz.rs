use arbitrary::{Arbitrary, Unstructured};
use fuzz_helpers::{run_chunked_fetch_once, ChunkedFetchInput};
use honggfuzz::fuzz;

fn main() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("current-thread runtime");

    loop {
        fuzz!(|data: &[u8]| {
            let Ok(input) = ChunkedFetchInput::arbitrary(&mut Unstructured::new(data)) else {
                return;
            };
            if let Err(e) = runtime.block_on(run_chunked_fetch_once(&input)) {
                panic!("Fuzz iteration failed: {}\nInput: {:?}", e, input);
            }
        });
    }
}

//! Property tests for the reverse round trip, run against an in-process service.

use proptest::prelude::*;
use rever_core::ReverseClient;
use reverse_service::ReverseServiceServer;
use reverse_service_impl::ReverseServiceImpl;
use tokio::runtime::{Builder, Runtime};


fn runtime() -> Runtime {
    Builder::new_current_thread().enable_all().build().unwrap()
}

fn reverse_client() -> ReverseClient<ReverseServiceServer<ReverseServiceImpl>> {
    ReverseClient::from_service(ReverseServiceServer::new(ReverseServiceImpl))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Printable ASCII of any length up to 10000 comes back character-reversed.
    #[test]
    fn reverse_matches_char_reversal(data in "[ -~]{0,10000}") {
        let rt = runtime();
        let client = reverse_client();

        let reversed = rt.block_on(client.reverse(&data)).unwrap();

        let expected: String = data.chars().rev().collect();
        prop_assert_eq!(reversed, expected);
    }

    #[test]
    fn reverse_twice_is_identity(data in "[ -~]{0,10000}") {
        let rt = runtime();
        let client = reverse_client();

        let twice = rt.block_on(async {
            let once = client.reverse(&data).await?;
            client.reverse(&once).await
        }).unwrap();

        prop_assert_eq!(twice, data);
    }

    /// Arbitrary Unicode keeps a valid encoding and reverses by code point.
    #[test]
    fn reverse_keeps_code_points_intact(data in "\\PC{0,256}") {
        let rt = runtime();
        let client = reverse_client();

        let reversed = rt.block_on(client.reverse(&data)).unwrap();

        prop_assert_eq!(reversed.chars().count(), data.chars().count());
        prop_assert!(reversed.chars().eq(data.chars().rev()));
    }
}

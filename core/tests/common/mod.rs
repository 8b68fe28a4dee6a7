//! Helpers shared by the live tests: a mock server on a random port.

#![allow(dead_code)]

use std::net::SocketAddr;

use mock_server::Fixtures;

/// Start the mock server on its own thread and return its address.
pub fn spawn_server(fixtures: Fixtures) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, fixtures).await
        })
        .unwrap();
    });

    addr
}

/// An address nothing listens on.
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

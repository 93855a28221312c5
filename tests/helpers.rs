// Mock HTTP servers shared by the integration tests.
//
// Each server handles its connections strictly one after another, so a
// client that keeps an old connection open while opening the next one
// stalls until its read timeout fires.

use std::{
    io::{Read, Write},
    net::{TcpListener, TcpStream},
    thread::{self, JoinHandle},
    time::Duration,
};

/// What the server saw on one connection.
#[allow(dead_code)]
#[derive(Debug)]
pub struct Exchange {
    pub request: String,
    /// The client closed its end after the response was sent.
    pub closed_by_client: bool,
}

pub struct MockServer {
    pub listener: TcpListener,
    pub port: u16,
}

#[allow(dead_code)]
impl MockServer {
    pub fn bind() -> MockServer {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind mock server");
        let port = listener.local_addr().unwrap().port();
        MockServer { listener, port }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }

    /// Answers one connection per response, in order. Returns the listener
    /// too so tests can check that no further connection arrived.
    pub fn serve(self, responses: Vec<Vec<u8>>) -> JoinHandle<(TcpListener, Vec<Exchange>)> {
        thread::spawn(move || {
            let mut exchanges = Vec::new();
            for response in responses {
                let (mut stream, _) = self.listener.accept().expect("accept failed");
                stream
                    .set_read_timeout(Some(Duration::from_secs(5)))
                    .unwrap();
                let request = read_request(&mut stream);
                stream.write_all(&response).unwrap();
                stream.shutdown(std::net::Shutdown::Write).unwrap();
                let closed_by_client = wait_for_close(&mut stream);
                exchanges.push(Exchange {
                    request,
                    closed_by_client,
                });
            }
            (self.listener, exchanges)
        })
    }
}

#[allow(dead_code)]
pub fn response(head: &str, body: &[u8]) -> Vec<u8> {
    let mut bytes = format!("{}\r\nConnection: close\r\n\r\n", head).into_bytes();
    bytes.extend_from_slice(body);
    bytes
}

pub fn read_request<S: Read>(stream: &mut S) -> String {
    let mut request = Vec::new();
    let mut buf = [0u8; 256];
    while !request.ends_with(b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8_lossy(&request).into_owned()
}

fn wait_for_close(stream: &mut TcpStream) -> bool {
    let mut buf = [0u8; 64];
    loop {
        match stream.read(&mut buf) {
            Ok(0) => return true,
            Ok(_) => continue,
            Err(_) => return false,
        }
    }
}

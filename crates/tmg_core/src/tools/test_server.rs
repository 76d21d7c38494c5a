//! Minimal one-shot HTTP responder for download tests.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// Serve `body` with status 200 to exactly one request.
///
/// Returns the URL to fetch and the server thread, which finishes after the
/// response has been written.
pub fn serve_once(body: Vec<u8>) -> (String, JoinHandle<()>) {
    respond_once(200, "OK", body, "payload.bin")
}

/// Same as [`serve_once`] but the URL ends in `file_name`.
pub fn serve_file(file_name: &str, body: Vec<u8>) -> (String, JoinHandle<()>) {
    respond_once(200, "OK", body, file_name)
}

/// Answer exactly one request with an empty body and the given status.
pub fn serve_status(status: u16, reason: &'static str) -> (String, JoinHandle<()>) {
    respond_once(status, reason, Vec::new(), "payload.bin")
}

fn respond_once(
    status: u16,
    reason: &'static str,
    body: Vec<u8>,
    file_name: &str,
) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!(
        "http://{}/downloads/{}",
        listener.local_addr().unwrap(),
        file_name
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();

        // Drain the request head
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
        }

        let head = format!(
            "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status,
            reason,
            body.len()
        );
        stream.write_all(head.as_bytes()).unwrap();
        stream.write_all(&body).unwrap();
        stream.flush().unwrap();
    });

    (url, handle)
}

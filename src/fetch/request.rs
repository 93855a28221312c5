use log::debug;
use std::io::{self, Write};

pub fn write_request<W: Write>(s: &mut W, host: &str, path: &str) -> io::Result<()> {
    debug!("GET {} from {}", path, host);
    s.write_all(format!("GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n", path, host).as_bytes())?;
    s.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_exact_framing() {
        let mut wire = Vec::new();
        write_request(&mut wire, "example.com", "/docs/index.html").unwrap();
        assert_eq!(
            String::from_utf8(wire).unwrap(),
            "GET /docs/index.html HTTP/1.1\r\nHost: example.com\r\nConnection: close\r\n\r\n"
        );
    }
}

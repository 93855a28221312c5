use crate::config::{FetchConfig, TlsDispatch, HTTPS_PORT};
use crate::fetch::error::FetchError;
use crate::fetch::url::ParsedUrl;
use log::{debug, warn};
use openssl::ssl::{self, ErrorCode, SslConnector, SslMethod, SslStream, SslVerifyMode};
use std::{
    io::{self, Read, Write},
    net::{Shutdown, TcpStream, ToSocketAddrs},
    time::Duration,
};

enum Transport {
    Plain(TcpStream),
    Tls(SslStream<TcpStream>),
}

/// One socket for one request/response cycle. The transport is released by
/// [`Connection::close`], or on drop if the owner never got that far.
pub struct Connection {
    addr: String,
    transport: Option<Transport>,
}

impl Connection {
    pub fn open(url: &ParsedUrl, config: &FetchConfig) -> Result<Connection, FetchError> {
        let addr = url.addr();
        if url.host.is_empty() {
            return Err(FetchError::connect(addr, "no host in URL"));
        }
        let tcp = connect_tcp(&url.host, url.port, config.connect_timeout)
            .map_err(|e| FetchError::connect(&addr, e))?;
        tcp.set_read_timeout(config.io_timeout)
            .and_then(|_| tcp.set_write_timeout(config.io_timeout))
            .map_err(|e| FetchError::connect(&addr, e))?;

        let secure = match config.tls_dispatch {
            TlsDispatch::Port => url.port == HTTPS_PORT,
            TlsDispatch::Scheme => url.is_https(),
        };
        let transport = if secure {
            let tls = tls_handshake(&url.host, tcp, config.verify_certificates)
                .map_err(|e| FetchError::connect(&addr, e))?;
            Transport::Tls(tls)
        } else {
            Transport::Plain(tcp)
        };
        debug!("connected to {} (tls: {})", addr, secure);
        Ok(Connection {
            addr,
            transport: Some(transport),
        })
    }

    pub fn is_tls(&self) -> bool {
        matches!(self.transport, Some(Transport::Tls(_)))
    }

    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        match self.transport.take() {
            Some(Transport::Plain(tcp)) => {
                let _ = tcp.shutdown(Shutdown::Both);
            }
            Some(Transport::Tls(mut tls)) => {
                // The peer has usually hung up already, so close_notify may fail.
                let _ = tls.shutdown();
                let _ = tls.get_ref().shutdown(Shutdown::Both);
            }
            None => return,
        }
        debug!("closed connection to {}", self.addr);
    }

    fn transport(&mut self) -> io::Result<&mut Transport> {
        self.transport
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "connection closed"))
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.transport()? {
            Transport::Plain(s) => s.read(buf),
            Transport::Tls(s) => read_tls(s, buf),
        }
    }
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.transport()? {
            Transport::Plain(s) => s.write(buf),
            Transport::Tls(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.transport()? {
            Transport::Plain(s) => s.flush(),
            Transport::Tls(s) => s.flush(),
        }
    }
}

// Servers that hang up without close_notify still end the response.
fn read_tls(s: &mut SslStream<TcpStream>, buf: &mut [u8]) -> io::Result<usize> {
    match s.ssl_read(buf) {
        Ok(n) => Ok(n),
        Err(e) if e.code() == ErrorCode::ZERO_RETURN => Ok(0),
        Err(e) if is_unexpected_eof(&e) => {
            debug!("peer closed the TLS stream without close_notify");
            Ok(0)
        }
        Err(e) => Err(e
            .into_io_error()
            .unwrap_or_else(|e| io::Error::new(io::ErrorKind::Other, e))),
    }
}

fn is_unexpected_eof(e: &ssl::Error) -> bool {
    match e.code() {
        ErrorCode::SYSCALL => e.io_error().is_none(),
        ErrorCode::SSL => e.ssl_error().map_or(false, |stack| {
            stack
                .errors()
                .iter()
                .any(|err| err.reason().map_or(false, |r| r.contains("unexpected eof")))
        }),
        _ => false,
    }
}

fn connect_tcp(host: &str, port: u16, timeout: Option<Duration>) -> io::Result<TcpStream> {
    let timeout = match timeout {
        Some(timeout) => timeout,
        None => return TcpStream::connect((host, port)),
    };
    let mut last_err = None;
    for addr in (host, port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(s) => return Ok(s),
            Err(e) => last_err = Some(e),
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, format!("{} resolved to no addresses", host))
    }))
}

fn tls_handshake(
    host: &str,
    tcp: TcpStream,
    verify: bool,
) -> Result<SslStream<TcpStream>, Box<dyn std::error::Error>> {
    let mut builder = SslConnector::builder(SslMethod::tls())?;
    if !verify {
        warn!("certificate verification is disabled for {}", host);
        builder.set_verify(SslVerifyMode::NONE);
    }
    let stream = builder
        .build()
        .configure()?
        .verify_hostname(verify)
        .connect(host, tcp)?;
    Ok(stream)
}

mod helpers;

use browrooms::{FetchConfig, FetchError, Fetcher, TlsDispatch};
use helpers::{read_request, response, MockServer};
use openssl::{
    asn1::Asn1Time,
    bn::BigNum,
    hash::MessageDigest,
    pkey::{PKey, Private},
    rsa::Rsa,
    ssl::{SslAcceptor, SslMethod},
    x509::{X509NameBuilder, X509},
};
use std::{io::Write, thread, time::Duration};

fn self_signed() -> (PKey<Private>, X509) {
    let key = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();

    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_text("CN", "localhost").unwrap();
    let name = name.build();

    let mut cert = X509::builder().unwrap();
    cert.set_version(2).unwrap();
    let serial = BigNum::from_u32(1).unwrap().to_asn1_integer().unwrap();
    cert.set_serial_number(&serial).unwrap();
    cert.set_subject_name(&name).unwrap();
    cert.set_issuer_name(&name).unwrap();
    cert.set_pubkey(&key).unwrap();
    cert.set_not_before(&Asn1Time::days_from_now(0).unwrap()).unwrap();
    cert.set_not_after(&Asn1Time::days_from_now(1).unwrap()).unwrap();
    cert.sign(&key, MessageDigest::sha256()).unwrap();
    (key, cert.build())
}

/// Serves one TLS connection and returns the request it received.
fn serve_tls(server: MockServer, body: Vec<u8>) -> thread::JoinHandle<Option<String>> {
    let (key, cert) = self_signed();
    let mut acceptor = SslAcceptor::mozilla_intermediate_v5(SslMethod::tls()).unwrap();
    acceptor.set_private_key(&key).unwrap();
    acceptor.set_certificate(&cert).unwrap();
    acceptor.check_private_key().unwrap();
    let acceptor = acceptor.build();

    thread::spawn(move || {
        let (stream, _) = server.listener.accept().unwrap();
        stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        // A rejected handshake ends the exchange without a request.
        let mut tls = acceptor.accept(stream).ok()?;
        let request = read_request(&mut tls);
        tls.write_all(&body).unwrap();
        let _ = tls.shutdown();
        Some(request)
    })
}

fn tls_fetcher(verify_certificates: bool) -> Fetcher {
    Fetcher::new(FetchConfig {
        tls_dispatch: TlsDispatch::Scheme,
        verify_certificates,
        io_timeout: Some(Duration::from_secs(5)),
        ..FetchConfig::default()
    })
}

#[test]
fn self_signed_certificate_is_accepted_by_default() {
    let server = MockServer::bind();
    let url = format!("https://127.0.0.1:{}/secure", server.port);
    let handle = serve_tls(server, response("HTTP/1.1 200 OK", b"<p>over tls</p>"));

    let page = tls_fetcher(false).try_fetch(&url).unwrap();
    let request = handle.join().unwrap();

    assert!(page.text.ends_with("<p>over tls</p>"));
    assert_eq!(
        request.as_deref(),
        Some("GET /secure HTTP/1.1\r\nHost: 127.0.0.1\r\nConnection: close\r\n\r\n")
    );
}

#[test]
fn verification_rejects_self_signed_certificate() {
    let server = MockServer::bind();
    let url = format!("https://127.0.0.1:{}/", server.port);
    let handle = serve_tls(server, Vec::new());

    let err = tls_fetcher(true).try_fetch(&url).unwrap_err();
    assert!(handle.join().unwrap().is_none());
    assert!(matches!(err, FetchError::Connect { .. }));
}

#[test]
fn port_dispatch_speaks_plain_http_to_https_urls_on_other_ports() {
    let server = MockServer::bind();
    let url = format!("https://127.0.0.1:{}/", server.port);
    let handle = server.serve(vec![response("HTTP/1.1 200 OK", b"plain")]);

    let fetcher = Fetcher::new(FetchConfig {
        io_timeout: Some(Duration::from_secs(5)),
        ..FetchConfig::default()
    });
    let body = fetcher.fetch(&url);
    handle.join().unwrap();
    assert!(body.ends_with("plain"));
}

use super::*;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

struct Captured {
    request_line: String,
    headers: Vec<String>,
    body: String,
}

/// Serve exactly one canned response on a local port.
fn serve_once(status: &str, body: &str) -> (String, mpsc::Receiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let status = status.to_string();
    let body = body.to_string();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        let mut headers = Vec::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end().to_string();
            if line.is_empty() {
                break;
            }
            if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = v.trim().parse().unwrap();
            }
            headers.push(line);
        }
        let mut buf = vec![0u8; content_length];
        reader.read_exact(&mut buf).unwrap();

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();

        let _ = tx.send(Captured {
            request_line: request_line.trim_end().to_string(),
            headers,
            body: String::from_utf8(buf).unwrap(),
        });
    });

    (format!("http://{addr}"), rx)
}

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(f)
}

fn has_header(captured: &Captured, name: &str, value: &str) -> bool {
    captured.headers.iter().any(|h| {
        let lower = h.to_ascii_lowercase();
        lower.starts_with(&format!("{}:", name.to_ascii_lowercase())) && h.contains(value)
    })
}

#[test]
fn test_load_url_escapes_project_id() {
    let ctx = RequestContext::new("http://localhost:4000/");
    let url = load_url(&ctx, "a b/c").unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:4000/api/projects/load/a%20b%2Fc"
    );
}

#[test]
fn test_missing_backend_short_circuits() {
    let backend = HttpBackend::new();
    let ctx = RequestContext::new("");

    let err = block_on(backend.load_project(ctx.clone(), "p1".into())).unwrap_err();
    assert!(matches!(err, RemoteError::MissingBackend));

    let err = block_on(backend.authenticate(
        ctx,
        Credentials::Login {
            email: "a@b.co".into(),
            password: "secret".into(),
        },
    ))
    .unwrap_err();
    assert!(matches!(err, AuthError::Remote(RemoteError::MissingBackend)));
}

#[test]
fn test_save_posts_camel_case_payload() {
    let (base, rx) = serve_once("200 OK", "{}");
    let backend = HttpBackend::new();
    let mut files = crate::kernel::project::Files::new();
    files.insert("App.jsx".into(), "x".into());

    block_on(backend.save_project(
        RequestContext::new(base).with_token(Some("tok".into())),
        RemoteSaveRequest {
            project_id: "p1".into(),
            files,
            title: "CipherStudio p1".into(),
        },
    ))
    .unwrap();

    let captured = rx.recv().unwrap();
    assert_eq!(captured.request_line, "POST /api/projects/save HTTP/1.1");
    assert!(has_header(&captured, "authorization", "Bearer tok"));
    let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(body["projectId"], "p1");
    assert_eq!(body["title"], "CipherStudio p1");
    assert_eq!(body["files"]["App.jsx"], "x");
}

#[test]
fn test_save_reports_error_status() {
    let (base, _rx) = serve_once("500 Internal Server Error", "{}");
    let err = block_on(HttpBackend::new().save_project(
        RequestContext::new(base),
        RemoteSaveRequest {
            project_id: "p1".into(),
            files: Default::default(),
            title: "t".into(),
        },
    ))
    .unwrap_err();
    assert!(matches!(err, RemoteError::Status(500)));
}

#[test]
fn test_load_returns_files_and_project_id() {
    let (base, rx) = serve_once(
        "200 OK",
        r#"{"projectId":"p2","files":{"App.jsx":"a","index.js":"b"}}"#,
    );
    let project = block_on(HttpBackend::new().load_project(RequestContext::new(base), "p1".into()))
        .unwrap();

    assert_eq!(project.project_id.as_deref(), Some("p2"));
    assert_eq!(
        project.files.keys().collect::<Vec<_>>(),
        vec!["App.jsx", "index.js"]
    );
    let captured = rx.recv().unwrap();
    assert_eq!(captured.request_line, "GET /api/projects/load/p1 HTTP/1.1");
}

#[test]
fn test_load_404_is_not_found() {
    let (base, _rx) = serve_once("404 Not Found", r#"{"message":"nope"}"#);
    let err = block_on(HttpBackend::new().load_project(RequestContext::new(base), "p1".into()))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_load_without_files_is_not_found() {
    let (base, _rx) = serve_once("200 OK", r#"{"projectId":"p1"}"#);
    let err = block_on(HttpBackend::new().load_project(RequestContext::new(base), "p1".into()))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_login_success_returns_session() {
    let (base, rx) = serve_once(
        "200 OK",
        r#"{"token":"t1","user":{"_id":"u1","email":"a@b.co","name":"Ada"}}"#,
    );
    let session = block_on(HttpBackend::new().authenticate(
        RequestContext::new(base),
        Credentials::Login {
            email: "a@b.co".into(),
            password: "secret".into(),
        },
    ))
    .unwrap();

    assert_eq!(session.token, "t1");
    assert_eq!(session.user.id.as_deref(), Some("u1"));
    let captured = rx.recv().unwrap();
    assert_eq!(captured.request_line, "POST /api/auth/login HTTP/1.1");
}

#[test]
fn test_register_rejection_uses_server_message() {
    let (base, rx) = serve_once("400 Bad Request", r#"{"message":"Email taken"}"#);
    let err = block_on(HttpBackend::new().authenticate(
        RequestContext::new(base),
        Credentials::Register {
            email: "a@b.co".into(),
            password: "secret".into(),
            name: "Ada".into(),
        },
    ))
    .unwrap_err();

    assert_eq!(err.to_string(), "Email taken");
    let captured = rx.recv().unwrap();
    assert_eq!(captured.request_line, "POST /api/auth/register HTTP/1.1");
    let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(body["name"], "Ada");
}

#[test]
fn test_login_rejection_without_message_uses_default() {
    let (base, _rx) = serve_once("401 Unauthorized", "{}");
    let err = block_on(HttpBackend::new().authenticate(
        RequestContext::new(base),
        Credentials::Login {
            email: "a@b.co".into(),
            password: "secret".into(),
        },
    ))
    .unwrap_err();
    assert_eq!(err.to_string(), "Login failed");
}

#[test]
fn test_validate_token_unauthorized_is_invalid_token() {
    let (base, rx) = serve_once("401 Unauthorized", "{}");
    let err = block_on(
        HttpBackend::new().validate_token(RequestContext::new(base).with_token(Some("old".into()))),
    )
    .unwrap_err();

    assert!(matches!(err, AuthError::InvalidToken));
    let captured = rx.recv().unwrap();
    assert!(has_header(&captured, "authorization", "Bearer old"));
}

#[test]
fn test_validate_token_returns_user() {
    let (base, _rx) = serve_once("200 OK", r#"{"user":{"id":"u1","name":"Ada"}}"#);
    let user = block_on(
        HttpBackend::new().validate_token(RequestContext::new(base).with_token(Some("t".into()))),
    )
    .unwrap();
    assert_eq!(user.name.as_deref(), Some("Ada"));
}

#[test]
fn test_validate_without_token_is_invalid() {
    let err = block_on(HttpBackend::new().validate_token(RequestContext::new("http://127.0.0.1:9")))
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken));
}

use serde_json::Value;
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};
use tokio::{
    io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream},
};

/// A request as the stub server received it.
#[derive(Debug, Clone)]
pub struct StubRequest {
    pub method: String,

    /// Path without the query string, e.g. `/rest/v1/recipes`
    pub path: String,

    /// Decoded query pairs, in order
    pub query: Vec<(String, String)>,

    /// Header names are lower-cased
    pub headers: HashMap<String, String>,

    pub body: String,
}

impl StubRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }

    /// Whether this is a read of `table`'s rows with the owner's profile
    /// embedded.
    pub fn is_joined_read(&self, table: &str) -> bool {
        self.path.ends_with(&format!("/{table}"))
            && self.param("select").is_some_and(|select| select.contains("profile:"))
    }
}

type Handler = dyn Fn(&StubRequest) -> (u16, Value) + Send + Sync;

/// An HTTP server on a loopback port answering PostgREST requests from a
/// handler, one request per connection.
pub struct PostgRestStub {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<StubRequest>>>,
}

impl PostgRestStub {
    pub async fn start(
        handler: impl Fn(&StubRequest) -> (u16, Value) + Send + Sync + 'static,
    ) -> PostgRestStub {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(vec![]));
        let handler: Arc<Handler> = Arc::new(handler);

        let log = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                let log = log.clone();
                let handler = handler.clone();
                tokio::spawn(async move { serve(stream, &*handler, &log).await });
            }
        });

        PostgRestStub { addr, requests }
    }

    /// Project URL to configure the driver with.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<StubRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn serve(stream: TcpStream, handler: &Handler, log: &Mutex<Vec<StubRequest>>) {
    let mut reader = BufReader::new(stream);
    let request = read_request(&mut reader).await;
    let (status, body) = handler(&request);
    log.lock().unwrap().push(request);

    let body = body.to_string();
    let response = format!(
        "HTTP/1.1 {status} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        reason(status),
        body.len(),
    );

    let mut stream = reader.into_inner();
    stream.write_all(response.as_bytes()).await.unwrap();
    let _ = stream.shutdown().await;
}

async fn read_request(reader: &mut BufReader<TcpStream>) -> StubRequest {
    let mut line = String::new();
    reader.read_line(&mut line).await.unwrap();

    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap().to_string();
    let target = parts.next().unwrap().to_string();
    let (path, query) = target.split_once('?').unwrap_or((target.as_str(), ""));

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).await.unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        let (name, value) = line.split_once(':').unwrap();
        headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    let len = headers
        .get("content-length")
        .map_or(0, |len| len.parse().unwrap());
    let mut body = vec![0; len];
    reader.read_exact(&mut body).await.unwrap();

    StubRequest {
        method,
        path: path.to_string(),
        query: url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect(),
        headers,
        body: String::from_utf8(body).unwrap(),
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        406 => "Not Acceptable",
        _ => "Unknown",
    }
}

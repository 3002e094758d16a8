//! In-memory `DashboardApi` and fixtures shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use anyhow::{anyhow, Result};
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use crate::api::DashboardApi;
use crate::models::{Credentials, LoginResponse, ResetPasswordRequest, Resource, Role, User, WasteItem};

pub fn admin() -> User {
    User {
        id: "1".to_string(),
        name: "Carla Admin".to_string(),
        email: "carla@example.com".to_string(),
        phone: "11912345678".to_string(),
        role: Role::Admin,
        avatar: None,
    }
}

pub fn member() -> User {
    User {
        id: "2".to_string(),
        name: "Bruno Coletor".to_string(),
        email: "bruno@example.com".to_string(),
        phone: "2134567890".to_string(),
        role: Role::Member("Collector".to_string()),
        avatar: Some("https://img.example.com/bruno.png".to_string()),
    }
}

pub fn waste(id: &str, name: &str, collected: bool) -> WasteItem {
    WasteItem {
        id: id.to_string(),
        name: name.to_string(),
        address: "Rua das Flores, 100".to_string(),
        collected,
    }
}

/// Records every call as `"<METHOD> <path>"` and serves collections from memory.
#[derive(Default)]
pub struct FakeApi {
    token: Option<String>,
    login_response: Option<LoginResponse>,
    collections: RefCell<HashMap<&'static str, Vec<Value>>>,
    failing: RefCell<Vec<String>>,
    calls: RefCell<Vec<String>>,
    next_id: Cell<u32>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(100),
            ..Default::default()
        }
    }

    pub fn with_login(mut self, user: Option<User>, token: Option<&str>) -> Self {
        self.login_response = Some(LoginResponse {
            user,
            token: token.map(str::to_string),
        });
        self
    }

    pub fn with_items<R: Resource>(self, items: Vec<R>) -> Self {
        let values = items
            .iter()
            .map(|item| serde_json::to_value(item).unwrap())
            .collect();
        self.collections.borrow_mut().insert(R::COLLECTION, values);
        self
    }

    /// Make every call whose description starts with `prefix` fail
    pub fn fail(&self, prefix: &str) {
        self.failing.borrow_mut().push(prefix.to_string());
    }

    /// Undo every `fail`
    pub fn heal(&self) {
        self.failing.borrow_mut().clear();
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn stored<R: Resource>(&self) -> Vec<R> {
        self.collections
            .borrow()
            .get(R::COLLECTION)
            .map(|values| {
                values
                    .iter()
                    .map(|v| serde_json::from_value(v.clone()).unwrap())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn record(&self, call: String) -> Result<()> {
        let failing = self.failing.borrow().iter().any(|f| call.starts_with(f.as_str()));
        self.calls.borrow_mut().push(call.clone());
        if failing {
            Err(anyhow!("simulated failure: {call}"))
        } else {
            Ok(())
        }
    }

    fn merge<B: Serialize>(target: &mut Value, body: &B) {
        if let (Value::Object(target), Ok(Value::Object(fields))) = (target, serde_json::to_value(body)) {
            for (key, value) in fields {
                target.insert(key, value);
            }
        }
    }
}

impl DashboardApi for FakeApi {
    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    async fn login(&self, _credentials: &Credentials) -> Result<LoginResponse> {
        self.record("POST auth/login".to_string())?;
        self.login_response
            .clone()
            .ok_or_else(|| anyhow!("Unauthorized - token missing or rejected"))
    }

    async fn forgot_password(&self, email: &str) -> Result<()> {
        self.record(format!("POST auth/forgot {email}"))
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<()> {
        self.record(format!("POST auth/reset {} {}", request.email, request.token))
    }

    async fn list<R: Resource>(&self) -> Result<Vec<R>> {
        self.record(format!("GET {}", R::COLLECTION))?;
        Ok(self.stored())
    }

    async fn fetch<R: Resource>(&self, id: &str) -> Result<R> {
        self.record(format!("GET {}/{id}", R::COLLECTION))?;
        self.stored::<R>()
            .into_iter()
            .find(|item| item.id() == id)
            .ok_or_else(|| anyhow!("Resource not found: {id}"))
    }

    async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<()> {
        self.record(format!("POST {}", R::COLLECTION))?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let mut value = serde_json::json!({ "id": id.to_string() });
        Self::merge(&mut value, draft);
        self.collections
            .borrow_mut()
            .entry(R::COLLECTION)
            .or_default()
            .push(value);
        Ok(())
    }

    async fn update<R: Resource>(&self, id: &str, patch: &R::Patch) -> Result<()> {
        self.record(format!("PUT {}/{id}", R::COLLECTION))?;
        let mut collections = self.collections.borrow_mut();
        let item = collections
            .get_mut(R::COLLECTION)
            .and_then(|items| items.iter_mut().find(|v| v["id"] == id))
            .ok_or_else(|| anyhow!("Resource not found: {id}"))?;
        Self::merge(item, patch);
        Ok(())
    }

    async fn delete<R: Resource>(&self, id: &str) -> Result<()> {
        self.record(format!("DELETE {}/{id}", R::COLLECTION))?;
        if let Some(items) = self.collections.borrow_mut().get_mut(R::COLLECTION) {
            items.retain(|v| v["id"] != id);
        }
        Ok(())
    }
}

/// Raw HTTP/1.1 response with an optional JSON body; always closes the connection
pub fn http_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Local HTTP stub answering one request per connection with the next canned
/// response. Returns the base URL and a channel yielding each raw request.
pub async fn serve_http(responses: Vec<String>) -> (String, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        for response in responses {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let request = read_request(&mut socket).await;
            let _ = tx.send(request);
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (base_url, rx)
}

/// Read headers plus `Content-Length` bytes of body
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).into_owned();
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

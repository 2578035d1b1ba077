#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use matchmaker::{
    error::{AppError, AppResult},
    models::{NewUser, User},
    services::email::{MxLookupError, MxResolver},
    store::{PgUserStore, UserStore, UserTransaction},
};
use serde_json::{Value, json};
use sqlx::PgPool;
use tokio::net::TcpListener;

pub fn init_tracing_once() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("matchmaker=debug")
            .with_test_writer()
            .init();
    });
}

/// A mock MX resolver answering from a fixed table, so tests never hit DNS.
///
/// - `nomx.com` has no MX records
/// - `missing.com` does not exist
/// - `broken.com` fails with a resolver error
/// - every other domain has one MX record
#[derive(Debug, Default)]
pub struct MockMxResolver {
    queried_domains: Mutex<Vec<String>>,
}

impl MockMxResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all domains that were looked up
    pub fn queried_domains(&self) -> Vec<String> {
        self.queried_domains.lock().unwrap().clone()
    }

    /// Get the number of lookups performed
    pub fn lookup_count(&self) -> usize {
        self.queried_domains.lock().unwrap().len()
    }
}

#[async_trait]
impl MxResolver for MockMxResolver {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<String>, MxLookupError> {
        self.queried_domains
            .lock()
            .unwrap()
            .push(domain.to_string());

        match domain {
            "nomx.com" => Err(MxLookupError::NoRecords),
            "missing.com" => Err(MxLookupError::NoSuchDomain),
            "broken.com" => Err(MxLookupError::Other(
                "no connections available".to_string(),
            )),
            _ => Ok(vec![format!("mx.{domain}.")]),
        }
    }
}

#[derive(Debug, Default)]
struct MemoryTables {
    next_id: i32,
    users: BTreeMap<i32, User>,
}

impl MemoryTables {
    fn email_taken(&self, email: &str, except_id: Option<i32>) -> bool {
        self.users
            .values()
            .any(|user| user.email == email && Some(user.id) != except_id)
    }

    fn insert(&mut self, new_user: &NewUser) -> AppResult<User> {
        if self.email_taken(&new_user.email, None) {
            return Err(AppError::DuplicateEmail(new_user.email.clone()));
        }

        self.next_id += 1;
        let user = User {
            id: self.next_id,
            name: new_user.name.clone(),
            age: new_user.age,
            gender: new_user.gender.clone(),
            email: new_user.email.clone(),
            city: new_user.city.clone(),
            interests: new_user.interests.clone(),
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }
}

/// An in-memory user store with the same uniqueness and ordering rules as
/// the PostgreSQL one. Transactions work on a copy of the tables that
/// replaces the shared state on commit.
#[derive(Debug, Default, Clone)]
pub struct MemoryUserStore {
    tables: Arc<Mutex<MemoryTables>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &NewUser) -> AppResult<User> {
        self.tables.lock().unwrap().insert(user)
    }

    async fn get(&self, id: i32) -> AppResult<Option<User>> {
        Ok(self.tables.lock().unwrap().users.get(&id).cloned())
    }

    async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<User>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .users
            .values()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn list_by_gender(&self, gender: &str) -> AppResult<Vec<User>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .users
            .values()
            .filter(|user| user.gender == gender)
            .cloned()
            .collect())
    }

    async fn update(&self, user: &User) -> AppResult<Option<User>> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.users.contains_key(&user.id) {
            return Ok(None);
        }
        if tables.email_taken(&user.email, Some(user.id)) {
            return Err(AppError::DuplicateEmail(user.email.clone()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.lock().unwrap().users.remove(&id).is_some())
    }

    async fn begin(&self) -> AppResult<Box<dyn UserTransaction>> {
        let snapshot = {
            let tables = self.tables.lock().unwrap();
            MemoryTables {
                next_id: tables.next_id,
                users: tables.users.clone(),
            }
        };

        Ok(Box::new(MemoryTransaction {
            shared: Arc::clone(&self.tables),
            working: snapshot,
        }))
    }
}

struct MemoryTransaction {
    shared: Arc<Mutex<MemoryTables>>,
    working: MemoryTables,
}

#[async_trait]
impl UserTransaction for MemoryTransaction {
    async fn email_exists(&mut self, email: &str) -> AppResult<bool> {
        Ok(self.working.email_taken(email, None))
    }

    async fn insert(&mut self, user: &NewUser) -> AppResult<User> {
        self.working.insert(user)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let MemoryTransaction { shared, working } = *self;
        *shared.lock().unwrap() = working;
        Ok(())
    }
}

pub struct TestApp {
    pub address: String,
    pub store: Arc<dyn UserStore>,
    pub resolver: Arc<MockMxResolver>,
    pub client: reqwest::Client,
}

/// Spawns the application on a random port with an in-memory store and a
/// mock MX resolver.
///
/// Returned address format: `http://127.0.0.1:8492`
pub async fn spawn_app() -> TestApp {
    spawn_app_with_store(Arc::new(MemoryUserStore::new())).await
}

/// Spawns the application against a real PostgreSQL pool, keeping the mock
/// MX resolver.
pub async fn spawn_app_with_pool(pool: PgPool) -> TestApp {
    spawn_app_with_store(Arc::new(PgUserStore::new(pool))).await
}

async fn spawn_app_with_store(store: Arc<dyn UserStore>) -> TestApp {
    init_tracing_once();

    let resolver = Arc::new(MockMxResolver::new());

    // Randomly choose an available port
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port at localhost");
    let port = listener.local_addr().unwrap().port();

    let app = matchmaker::app_with_services(Arc::clone(&store), resolver.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let address = format!("http://127.0.0.1:{port}");

    // Wait for server to be ready
    let client = reqwest::Client::new();
    for _ in 0..10 {
        if client
            .get(format!("{address}/health-check"))
            .send()
            .await
            .is_ok()
        {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }

    TestApp {
        address,
        store,
        resolver,
        client,
    }
}

impl TestApp {
    /// Number of stored users, for asserting on side effects
    pub async fn stored_count(&self) -> usize {
        self.store
            .list(0, i64::MAX)
            .await
            .expect("Failed to list users")
            .len()
    }

    /// POST /users/ and return the raw response
    pub async fn post_user(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/users/", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Creates a user, asserting success, and returns the stored record
    pub async fn create_user(&self, body: &Value) -> User {
        let response = self.post_user(body).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse user")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{path}", self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn john() -> Value {
    json!({
        "name": "John Doe",
        "age": 30,
        "gender": "male",
        "email": "johndoe@gmail.com",
        "city": "Mumbai",
        "interests": "cricket, movies"
    })
}

pub fn jane() -> Value {
    json!({
        "name": "Jane Doe",
        "age": 28,
        "gender": "female",
        "email": "janedoe@gmail.com",
        "city": "Delhi",
        "interests": "reading, movies, traveling"
    })
}

pub fn user_json(name: &str, gender: &str, email: &str, interests: &str) -> Value {
    json!({
        "name": name,
        "age": 25,
        "gender": gender,
        "email": email,
        "city": "Pune",
        "interests": interests
    })
}

//! In-memory message broker speaking the jmqp wire protocol.
//!
//! Every path is served by one handler: `GET` reads a message for the name
//! carried in the body, `POST`/`PUT` publish the body to the `To` header.
//! The `Type` header picks personal inboxes or topics.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    Router,
};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

/// Messages a personal inbox holds before publishing is refused.
pub const PERSONAL_CAPACITY: usize = 10;

/// Upper bound applied to every topic message timeout.
pub const DEFAULT_MAX_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Personal,
    Topic,
}

/// Why a read found nothing to return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    UnknownName(Kind),
    Empty(Kind),
}

/// The personal inbox already holds [`PERSONAL_CAPACITY`] messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxFull;

#[derive(Debug, Clone)]
struct TopicMessage {
    body: String,
    expires_at: Instant,
}

/// Queue state shared by all requests.
#[derive(Debug)]
pub struct Broker {
    max_timeout: Duration,
    personal: HashMap<String, VecDeque<String>>,
    topics: HashMap<String, VecDeque<TopicMessage>>,
}

impl Default for Broker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TIMEOUT)
    }
}

impl Broker {
    pub fn new(max_timeout: Duration) -> Self {
        Self {
            max_timeout,
            personal: HashMap::new(),
            topics: HashMap::new(),
        }
    }

    pub fn publish_personal(&mut self, to: &str, message: String) -> Result<(), InboxFull> {
        let inbox = self.personal.entry(to.to_string()).or_default();
        if inbox.len() >= PERSONAL_CAPACITY {
            return Err(InboxFull);
        }
        inbox.push_back(message);
        Ok(())
    }

    pub fn publish_topic(&mut self, topic: &str, message: String, timeout: Duration) {
        let ttl = timeout.min(self.max_timeout);
        self.topics
            .entry(topic.to_string())
            .or_default()
            .push_back(TopicMessage {
                body: message,
                expires_at: Instant::now() + ttl,
            });
    }

    /// Pops the oldest message from `person`'s inbox.
    pub fn read_personal(&mut self, person: &str) -> Result<String, ReadError> {
        let inbox = self
            .personal
            .get_mut(person)
            .ok_or(ReadError::UnknownName(Kind::Personal))?;
        inbox.pop_front().ok_or(ReadError::Empty(Kind::Personal))
    }

    /// Returns the oldest live message on `topic` without removing it.
    pub fn read_topic(&mut self, topic: &str) -> Result<String, ReadError> {
        let queue = self
            .topics
            .get_mut(topic)
            .ok_or(ReadError::UnknownName(Kind::Topic))?;
        let now = Instant::now();
        queue.retain(|message| message.expires_at > now);
        queue
            .front()
            .map(|message| message.body.clone())
            .ok_or(ReadError::Empty(Kind::Topic))
    }
}

pub type Db = Arc<RwLock<Broker>>;

pub fn app() -> Router {
    app_with(Broker::default())
}

pub fn app_with(broker: Broker) -> Router {
    let db: Db = Arc::new(RwLock::new(broker));
    Router::new()
        .fallback(handle)
        .with_state(db)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type Reply = (StatusCode, String);

async fn handle(State(db): State<Db>, method: Method, headers: HeaderMap, body: String) -> Reply {
    tracing::info!(%method, "broker request");
    if method == Method::GET {
        query(&db, &headers, body).await
    } else if method == Method::POST || method == Method::PUT {
        publish(&db, &headers, body).await
    } else {
        (
            StatusCode::BAD_REQUEST,
            format!("400 : BadRequest :: Method is not supported: {method}"),
        )
    }
}

fn bad_header(message: &str) -> Reply {
    (
        StatusCode::BAD_REQUEST,
        format!("400 : BadRequest :: {message}"),
    )
}

fn missing(message: String) -> Reply {
    (StatusCode::NOT_FOUND, format!("404 : ErrorMissing :: {message}"))
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn kind(headers: &HeaderMap) -> Result<Kind, Reply> {
    let value = header(headers, "Type").ok_or_else(|| bad_header("No 'Type' header field provided."))?;
    if value.eq_ignore_ascii_case("topic") {
        Ok(Kind::Topic)
    } else if value.eq_ignore_ascii_case("personal") {
        Ok(Kind::Personal)
    } else {
        Err(bad_header("'Type' must be either 'Topic' or 'Personal'."))
    }
}

async fn publish(db: &Db, headers: &HeaderMap, message: String) -> Reply {
    let kind = match kind(headers) {
        Ok(kind) => kind,
        Err(reply) => return reply,
    };
    let Some(to) = header(headers, "To") else {
        return bad_header("No 'To' header field provided.");
    };

    match kind {
        Kind::Topic => {
            let Some(raw) = header(headers, "Timeout") else {
                return bad_header("No 'Timeout' header provided for topic message.");
            };
            let Ok(seconds) = raw.trim().parse::<u64>() else {
                return bad_header("Could not parse provided 'Timeout' value.");
            };
            db.write()
                .await
                .publish_topic(to, message.clone(), Duration::from_secs(seconds));
        }
        Kind::Personal => {
            if db.write().await.publish_personal(to, message.clone()).is_err() {
                return (
                    StatusCode::NOT_ACCEPTABLE,
                    "406 : ErrorUnacceptable :: the person's inbox is full.".to_string(),
                );
            }
        }
    }

    (
        StatusCode::ACCEPTED,
        format!("202 : StatusAccepted :: The message was accepted for '{to}': '{message}'."),
    )
}

async fn query(db: &Db, headers: &HeaderMap, target: String) -> Reply {
    let kind = match kind(headers) {
        Ok(kind) => kind,
        Err(reply) => return reply,
    };

    let mut broker = db.write().await;
    let result = match kind {
        Kind::Personal => broker.read_personal(&target),
        Kind::Topic => broker.read_topic(&target),
    };

    match result {
        Ok(message) => (StatusCode::OK, message),
        Err(ReadError::UnknownName(Kind::Personal)) => {
            missing(format!("Requested Username is missing: {target}"))
        }
        Err(ReadError::UnknownName(Kind::Topic)) => {
            missing(format!("Requested Topic is missing: {target}"))
        }
        Err(ReadError::Empty(Kind::Personal)) => {
            missing(format!("Queue for user {target} is empty."))
        }
        Err(ReadError::Empty(Kind::Topic)) => {
            missing(format!("Queue for topic {target} is empty."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn personal_messages_pop_in_order() {
        let mut broker = Broker::default();
        broker.publish_personal("bob", "one".to_string()).unwrap();
        broker.publish_personal("bob", "two".to_string()).unwrap();
        assert_eq!(broker.read_personal("bob").unwrap(), "one");
        assert_eq!(broker.read_personal("bob").unwrap(), "two");
        assert_eq!(
            broker.read_personal("bob"),
            Err(ReadError::Empty(Kind::Personal))
        );
    }

    #[test]
    fn unknown_person_is_reported() {
        let mut broker = Broker::default();
        assert_eq!(
            broker.read_personal("nobody"),
            Err(ReadError::UnknownName(Kind::Personal))
        );
    }

    #[test]
    fn personal_inbox_is_bounded() {
        let mut broker = Broker::default();
        for i in 0..PERSONAL_CAPACITY {
            broker.publish_personal("bob", i.to_string()).unwrap();
        }
        assert_eq!(
            broker.publish_personal("bob", "overflow".to_string()),
            Err(InboxFull)
        );
    }

    #[test]
    fn topic_reads_do_not_consume() {
        let mut broker = Broker::default();
        broker.publish_topic("news", "headline".to_string(), Duration::from_secs(10));
        assert_eq!(broker.read_topic("news").unwrap(), "headline");
        assert_eq!(broker.read_topic("news").unwrap(), "headline");
    }

    #[test]
    fn expired_topic_messages_are_dropped() {
        let mut broker = Broker::new(Duration::ZERO);
        broker.publish_topic("news", "stale".to_string(), Duration::from_secs(10));
        assert_eq!(broker.read_topic("news"), Err(ReadError::Empty(Kind::Topic)));
    }

    #[test]
    fn unknown_topic_is_reported() {
        let mut broker = Broker::default();
        assert_eq!(
            broker.read_topic("nothing"),
            Err(ReadError::UnknownName(Kind::Topic))
        );
    }
}

//! Scripted in-memory transport for page tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};

use catalog_core::{
    Catalog, CatalogClient, Category, CategoryRef, HttpRequest, HttpResponse, Product, Transport, TransportError,
};
use chrono::{TimeZone, Utc};

type Reply = Result<HttpResponse, TransportError>;

/// Answers requests from a queue and records what was sent.
///
/// A reply queued with a path answers only the first request whose URL
/// ends with it, so concurrent fetches do not depend on poll order.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedTransport {
    replies: Arc<Mutex<VecDeque<(Option<String>, Reply)>>>,
    sent: Arc<Mutex<Vec<HttpRequest>>>,
}

fn ok(status: u16, body: &str) -> Reply {
    Ok(HttpResponse {
        status,
        body: body.to_string(),
    })
}

impl ScriptedTransport {
    pub(crate) fn reply(&self, status: u16, body: &str) -> &Self {
        self.replies.lock().unwrap().push_back((None, ok(status, body)));
        self
    }

    pub(crate) fn reply_at(&self, path: &str, status: u16, body: &str) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back((Some(path.to_string()), ok(status, body)));
        self
    }

    pub(crate) fn unreachable(&self) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back((None, Err(TransportError("connection refused".to_string()))));
        self
    }

    pub(crate) fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn catalog(&self) -> Catalog<ScriptedTransport> {
        Catalog::new(CatalogClient::new("http://test/api"), self.clone())
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        let reply = {
            let mut replies = self.replies.lock().unwrap();
            replies
                .iter()
                .position(|(path, _)| path.as_ref().map_or(true, |p| request.path.ends_with(p.as_str())))
                .and_then(|index| replies.remove(index))
                .map(|(_, reply)| reply)
                .unwrap_or_else(|| Err(TransportError("no scripted reply".to_string())))
        };
        self.sent.lock().unwrap().push(request);
        async move { reply }
    }
}

pub(crate) fn category_json(id: &str, name: &str) -> String {
    format!(r#"{{"_id":"{id}","name":"{name}","createdAt":"2024-03-01T10:00:00Z"}}"#)
}

pub(crate) fn product_json(id: &str, name: &str, category: Option<&str>) -> String {
    let category = match category {
        Some(c) => category_json(c, "Tools"),
        None => "null".to_string(),
    };
    format!(
        r#"{{"_id":"{id}","name":"{name}","title":"{name} title","description":"{name} description","category":{category},"productImage":["{id}.png"],"createdAt":"2024-03-02T10:00:00Z","updatedAt":"2024-03-02T10:00:00Z"}}"#
    )
}

pub(crate) fn product(id: &str, name: &str, category: Option<&str>) -> Product {
    let at = Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap();
    Product {
        id: id.to_string(),
        name: name.to_string(),
        title: format!("{name} title"),
        description: format!("{name} description"),
        category: category.map(|c| {
            CategoryRef::Embedded(Category {
                id: c.to_string(),
                name: "Tools".to_string(),
                created_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()),
                updated_at: None,
            })
        }),
        images: vec![format!("{id}.png")],
        created_at: at,
        updated_at: at,
    }
}

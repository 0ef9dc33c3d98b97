//! Service description documents.
//!
//! Both documents are generated once from the route table at startup and
//! served as static JSON afterwards.

use serde_json::{json, Map, Value};

use crate::routing::{HandlerKind, RouteTable};

/// Human-readable gateway name.
pub const SERVICE_TITLE: &str = "Maintenance Gateway";

/// Description shared by `/` and `/apispec.json`.
pub const SERVICE_DESCRIPTION: &str =
    "API Gateway for managing maintenance operations including cars, damage types and damage reports";

/// API version advertised in the documents.
pub const API_VERSION: &str = "1.0.0";

/// Pre-rendered documents.
#[derive(Debug, Clone)]
pub struct ServiceDocs {
    pub index: Value,
    pub apispec: Value,
}

impl ServiceDocs {
    pub fn from_table(table: &RouteTable) -> Self {
        Self {
            index: index_document(table),
            apispec: apispec_document(table),
        }
    }
}

/// `GET /` body: name, version and the route surface.
pub fn index_document(table: &RouteTable) -> Value {
    let endpoints: Vec<Value> = table
        .routes()
        .iter()
        .map(|route| {
            json!({
                "method": route.method.as_str(),
                "path": route.pattern.as_str(),
                "service": route.service,
                "description": route.summary,
            })
        })
        .collect();

    json!({
        "service": SERVICE_TITLE,
        "description": SERVICE_DESCRIPTION,
        "version": API_VERSION,
        "documentation": "/apispec.json",
        "endpoints": endpoints,
    })
}

/// `GET /apispec.json` body: a Swagger 2.0 document.
pub fn apispec_document(table: &RouteTable) -> Value {
    let mut paths = Map::new();
    for route in table.routes() {
        let mut parameters: Vec<Value> = route
            .pattern
            .param_names()
            .map(|name| {
                json!({
                    "name": name,
                    "in": "path",
                    "type": "integer",
                    "required": true,
                })
            })
            .collect();
        if route.method.sends_body() {
            parameters.push(json!({
                "name": "body",
                "in": "body",
                "required": false,
                "schema": { "type": "object" },
            }));
        }

        let tag = match route.handler {
            HandlerKind::Forward | HandlerKind::Login => route.service.unwrap_or("gateway"),
            HandlerKind::Health | HandlerKind::Index | HandlerKind::ApiSpec => "gateway",
        };

        let mut operation = json!({
            "summary": route.summary,
            "tags": [tag],
            "produces": ["application/json"],
            "parameters": parameters,
            "responses": {
                "200": { "description": "Backend response, passed through" },
                "default": { "description": "Error envelope with the backend response" },
            },
        });
        if route.handler.is_local() {
            operation["security"] = json!([]);
        }

        let path_item = paths
            .entry(route.pattern.as_str().to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        path_item[route.method.as_str().to_ascii_lowercase()] = operation;
    }

    json!({
        "swagger": "2.0",
        "info": {
            "title": SERVICE_TITLE,
            "description": SERVICE_DESCRIPTION,
            "version": API_VERSION,
        },
        "securityDefinitions": {
            "cookieAuth": {
                "type": "apiKey",
                "name": "Authorization",
                "in": "cookie",
            }
        },
        "security": [{ "cookieAuth": [] }],
        "paths": paths,
    })
}

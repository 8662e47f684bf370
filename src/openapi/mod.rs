use crate::config::AppConfig;
use utoipa::openapi::{OpenApi as OpenApiDoc, Server};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Path of the interactive documentation page
pub const DOCS_PATH: &str = "/api-docs";
/// Path of the machine-readable document backing the page
pub const DOCS_JSON_PATH: &str = "/api-docs.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Foods API Reference",
        version = "1.0.0",
        description = r#"
A small CRUD API over the `foods` and `customer` tables.

Write endpoints accept `application/json` or `application/x-www-form-urlencoded`
bodies and answer with the driver's write result (`affectedRows`, `insertId`).
Read endpoints return the table rows as stored, keyed by column name.

Every failure is answered with an `ErrorResponse` body; `request_id` matches the
`x-request-id` response header.
        "#,
        contact(name = "Foods API maintainers"),
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    tags(
        (name = "food", description = "Food items in the foods table"),
        (name = "customer", description = "Read-only access to the customer table")
    ),
    paths(
        // Foods
        crate::handlers::foods::list_foods,
        crate::handlers::foods::create_food,
        crate::handlers::foods::rename_food,
        crate::handlers::foods::change_food_unit,
        crate::handlers::foods::delete_food,

        // Customers
        crate::handlers::customers::list_customers,
        crate::handlers::customers::get_customer,
        crate::handlers::customers::sorted_customers,
    ),
    components(
        schemas(
            crate::models::Food,
            crate::models::NewFood,
            crate::models::FoodNameUpdate,
            crate::models::FoodUnitUpdate,
            crate::models::Customer,
            crate::models::SortDirection,
            crate::db::WriteOutcome,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

/// The generated document, with `servers` filled from configuration
pub fn api_doc(config: &AppConfig) -> OpenApiDoc {
    let mut doc = ApiDoc::openapi();
    if let Some(url) = config.docs_server_url.as_deref().filter(|u| !u.trim().is_empty()) {
        doc.servers = Some(vec![Server::new(url)]);
    }
    doc
}

/// Swagger UI at `/api-docs/`, document at `/api-docs.json`
pub fn swagger_ui(config: &AppConfig) -> SwaggerUi {
    SwaggerUi::new(DOCS_PATH).url(DOCS_JSON_PATH, api_doc(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig::new(
            "sqlite::memory:".into(),
            "127.0.0.1".into(),
            3000,
            "test".into(),
        )
    }

    #[test]
    fn document_lists_every_route() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = json["paths"].as_object().unwrap();

        for path in ["/food", "/foods", "/foods/{id}", "/customers", "/customer", "/customer/{id}"] {
            assert!(paths.contains_key(path), "missing {path}");
        }
        assert!(paths["/food"]["get"].is_object());
        assert!(paths["/food"]["post"].is_object());
        assert!(paths["/food"]["put"].is_object());
        assert!(paths["/foods"]["patch"].is_object());
        assert!(paths["/foods/{id}"]["delete"].is_object());
        assert!(!paths.contains_key("/foods:id"));
    }

    #[test]
    fn contact_names_the_maintainers_only() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let contact = json["info"]["contact"].as_object().unwrap();
        assert_eq!(contact["name"], "Foods API maintainers");
        assert!(!contact.contains_key("url"));
        assert!(!contact.contains_key("email"));
    }

    #[test]
    fn document_carries_schemas_and_tags() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = json["components"]["schemas"].as_object().unwrap();
        for name in ["Food", "NewFood", "FoodNameUpdate", "FoodUnitUpdate", "Customer", "WriteOutcome", "ErrorResponse"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
        assert!(schemas["Food"]["properties"]["ITEM_ID"].is_object());

        let tags: Vec<&str> = json["tags"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|t| t["name"].as_str())
            .collect();
        assert_eq!(tags, ["food", "customer"]);
        assert_eq!(json["info"]["version"], "1.0.0");
    }

    #[test]
    fn configured_server_url_is_advertised() {
        assert!(api_doc(&config()).servers.is_none());

        let mut cfg = config();
        cfg.docs_server_url = Some("http://localhost:3000".into());
        let json = serde_json::to_value(api_doc(&cfg)).unwrap();
        assert_eq!(json["servers"][0]["url"], "http://localhost:3000");
    }
}

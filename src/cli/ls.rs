//! Ls command handler.

use color_eyre::Result;
use serde_json::{json, Value as JsonValue};

use crate::store::{CollectionPath, Direction, QueryExt};

use super::{print_json, App};

impl App {
    /// List a collection as a JSON array of `{id, fields}`.
    pub async fn run_ls(
        &self,
        path: &str,
        order_by: Option<&str>,
        desc: bool,
        limit: Option<usize>,
    ) -> Result<()> {
        let ctx = self.load_context(|_| {}).await?;
        let collection = CollectionPath::parse(path)?;

        let mut query = ctx.store.collection(&collection);
        if let Some(field) = order_by {
            let direction = if desc {
                Direction::Descending
            } else {
                Direction::Ascending
            };
            query = query.order_by(field, direction);
        }
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let listing: Vec<JsonValue> = query
            .fetch_all()
            .await?
            .into_iter()
            .map(|doc| json!({ "id": doc.id(), "fields": doc.fields() }))
            .collect();

        print_json(&listing)
    }
}

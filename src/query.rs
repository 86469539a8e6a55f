//! Query-string options for list and get calls.
//!
//! A [`QueryOption`] is a deferred edit of a [`QueryParams`]. Options are
//! applied in the order the caller passes them, after the base pagination
//! keys are set, so any option may override `page` or `limit`. Plain keys
//! are last-write-wins. The `with` key is the exception: every relation
//! option appends to it, producing a single comma-joined value.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A typed query-string key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QueryKey {
    Page,
    Limit,
    With,
    /// Full-text search (`query`).
    Query,
    /// `filter[<name>]`
    Filter(String),
    /// `order[<field>]`
    Order(String),
    /// Any key the typed variants do not cover.
    Custom(String),
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page => f.write_str("page"),
            Self::Limit => f.write_str("limit"),
            Self::With => f.write_str("with"),
            Self::Query => f.write_str("query"),
            Self::Filter(name) => write!(f, "filter[{name}]"),
            Self::Order(field) => write!(f, "order[{field}]"),
            Self::Custom(key) => f.write_str(key),
        }
    }
}

/// Related entities that can be embedded with `with=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Contacts,
    Companies,
    Leads,
    Customers,
    CatalogElements,
    LossReason,
    SourceId,
    OnlyDeleted,
    IsPriceModifiedByRobot,
}

impl Relation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::Companies => "companies",
            Self::Leads => "leads",
            Self::Customers => "customers",
            Self::CatalogElements => "catalog_elements",
            Self::LossReason => "loss_reason",
            Self::SourceId => "source_id",
            Self::OnlyDeleted => "only_deleted",
            Self::IsPriceModifiedByRobot => "is_price_modified_by_robot",
        }
    }
}

/// Sort direction for [`with_order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Query parameters for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<QueryKey, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters with `page` and `limit` already set.
    pub fn paginated(page: u32, limit: u32) -> Self {
        let mut params = Self::new();
        params.set(QueryKey::Page, page.to_string());
        params.set(QueryKey::Limit, limit.to_string());
        params
    }

    /// Set `key`, replacing any previous value.
    pub fn set(&mut self, key: QueryKey, value: impl Into<String>) {
        self.params.insert(key, value.into());
    }

    pub fn get(&self, key: &QueryKey) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &QueryKey) -> Option<String> {
        self.params.remove(key)
    }

    /// Append a relation to the comma-joined `with` value. Duplicates are
    /// ignored.
    pub fn append_with(&mut self, relation: &str) {
        match self.params.get_mut(&QueryKey::With) {
            Some(existing) => {
                if !existing.split(',').any(|r| r == relation) {
                    existing.push(',');
                    existing.push_str(relation);
                }
            }
            None => {
                self.params.insert(QueryKey::With, relation.to_string());
            }
        }
    }

    /// Apply options in order.
    pub fn apply(&mut self, options: &[QueryOption]) {
        for option in options {
            option.apply(self);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Rendered `(key, value)` pairs.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// URL-encoded query string without the leading `?`.
    pub fn encode(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            serializer.append_pair(&key.to_string(), value);
        }
        serializer.finish()
    }
}

/// A deferred edit of [`QueryParams`].
///
/// Options never fail.
#[derive(Clone)]
pub struct QueryOption(Arc<dyn Fn(&mut QueryParams) + Send + Sync>);

impl QueryOption {
    /// Wrap an arbitrary edit.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut QueryParams) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn apply(&self, params: &mut QueryParams) {
        (self.0)(params)
    }
}

impl fmt::Debug for QueryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("QueryOption(..)")
    }
}

pub fn with_page(page: u32) -> QueryOption {
    QueryOption::new(move |p| p.set(QueryKey::Page, page.to_string()))
}

pub fn with_limit(limit: u32) -> QueryOption {
    QueryOption::new(move |p| p.set(QueryKey::Limit, limit.to_string()))
}

/// Merge every pair as `filter[<key>]=<value>`.
pub fn with_filter<I, K, V>(filters: I) -> QueryOption
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let filters: Vec<(String, String)> = filters
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    QueryOption::new(move |p| {
        for (key, value) in &filters {
            p.set(QueryKey::Filter(key.clone()), value.clone());
        }
    })
}

/// Set a single `filter[<name>]` key.
pub fn with_filter_value(name: &str, value: impl Into<String>) -> QueryOption {
    let key = QueryKey::Filter(name.to_string());
    let value = value.into();
    QueryOption::new(move |p| p.set(key.clone(), value.clone()))
}

/// Full-text search.
pub fn with_query(query: impl Into<String>) -> QueryOption {
    let query = query.into();
    QueryOption::new(move |p| p.set(QueryKey::Query, query.clone()))
}

pub fn with_order(field: &str, order: SortOrder) -> QueryOption {
    let key = QueryKey::Order(field.to_string());
    QueryOption::new(move |p| p.set(key.clone(), order.as_str()))
}

/// Request an embedded relation. Multiple relation options accumulate.
pub fn with_relation(relation: Relation) -> QueryOption {
    QueryOption::new(move |p| p.append_with(relation.as_str()))
}

pub fn with_contacts() -> QueryOption {
    with_relation(Relation::Contacts)
}

pub fn with_companies() -> QueryOption {
    with_relation(Relation::Companies)
}

pub fn with_leads() -> QueryOption {
    with_relation(Relation::Leads)
}

pub fn with_customers() -> QueryOption {
    with_relation(Relation::Customers)
}

pub fn with_catalog_elements() -> QueryOption {
    with_relation(Relation::CatalogElements)
}

pub fn with_loss_reason() -> QueryOption {
    with_relation(Relation::LossReason)
}

pub fn with_source_id() -> QueryOption {
    with_relation(Relation::SourceId)
}

pub fn with_only_deleted() -> QueryOption {
    with_relation(Relation::OnlyDeleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_then_options() {
        let mut params = QueryParams::paginated(2, 50);
        params.apply(&[
            with_contacts(),
            with_filter([("name", "acme"), ("id", "7")]),
        ]);

        assert_eq!(params.get(&QueryKey::Page), Some("2"));
        assert_eq!(params.get(&QueryKey::Limit), Some("50"));
        assert_eq!(params.get(&QueryKey::With), Some("contacts"));
        assert_eq!(params.get(&QueryKey::Filter("name".into())), Some("acme"));
        assert_eq!(params.get(&QueryKey::Filter("id".into())), Some("7"));
        assert_eq!(params.len(), 5);
    }

    #[test]
    fn test_option_overrides_base_pagination() {
        let mut params = QueryParams::paginated(1, 50);
        params.apply(&[with_page(3), with_limit(250)]);
        assert_eq!(params.get(&QueryKey::Page), Some("3"));
        assert_eq!(params.get(&QueryKey::Limit), Some("250"));
    }

    #[test]
    fn test_last_write_wins() {
        let mut params = QueryParams::new();
        params.apply(&[with_query("first"), with_query("second")]);
        assert_eq!(params.get(&QueryKey::Query), Some("second"));
    }

    #[test]
    fn test_relations_join_with_comma() {
        let mut params = QueryParams::new();
        params.apply(&[with_contacts(), with_companies()]);
        assert_eq!(params.get(&QueryKey::With), Some("contacts,companies"));
    }

    #[test]
    fn test_duplicate_relation_not_repeated() {
        let mut params = QueryParams::new();
        params.apply(&[with_contacts(), with_contacts(), with_leads()]);
        assert_eq!(params.get(&QueryKey::With), Some("contacts,leads"));
    }

    #[test]
    fn test_key_rendering() {
        assert_eq!(QueryKey::Filter("type".into()).to_string(), "filter[type]");
        assert_eq!(QueryKey::Order("id".into()).to_string(), "order[id]");
        assert_eq!(QueryKey::Custom("x".into()).to_string(), "x");
    }

    #[test]
    fn test_encode() {
        let mut params = QueryParams::paginated(1, 50);
        params.apply(&[with_order("created_at", SortOrder::Desc)]);
        let encoded = params.encode();
        assert!(encoded.contains("page=1"));
        assert!(encoded.contains("limit=50"));
        assert!(encoded.contains("order%5Bcreated_at%5D=desc"));
    }

    #[test]
    fn test_empty_params() {
        let params = QueryParams::new();
        assert!(params.is_empty());
        assert_eq!(params.encode(), "");
    }
}

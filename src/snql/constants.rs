// This code is licensed under Elastic License 2.0
// https://www.elastic.co/licensing/elastic-license

/// Column holding the metric value aggregations run over.
pub const VALUE_COLUMN: &str = "value";

/// Column holding the metric id each row belongs to.
pub const METRIC_ID_COLUMN: &str = "metric_id";

/// Map column holding indexed tags, addressed as `tags[<tag key id>]`.
pub const TAGS_COLUMN: &str = "tags";

pub(crate) const AND: &str = "and";
pub(crate) const IN: &str = "in";
pub(crate) const NOT_IN: &str = "notIn";
pub(crate) const EQUALS: &str = "equals";
pub(crate) const PLUS: &str = "plus";
pub(crate) const MINUS: &str = "minus";
pub(crate) const DIVIDE: &str = "divide";
pub(crate) const COUNT_IF: &str = "countIf";
pub(crate) const SUM_IF: &str = "sumIf";
pub(crate) const UNIQ_IF: &str = "uniqIf";

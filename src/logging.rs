pub mod targets {
    pub const SEARCH: &str = "search";
    pub const PROPAGATION: &str = "propagation";
    pub const BRANCH: &str = "branch";
    pub const COUNT: &str = "count";
}

pub mod batch;
pub mod config;
pub mod issue;
pub mod logging;
pub mod output;
pub mod run;
pub mod source;

pub mod cli {
    pub mod parser;
}

pub mod github {
    #[cfg(test)]
    pub mod fake;
    pub mod gh;
    pub mod issues;
    pub mod labels;
    pub mod tracker;
}

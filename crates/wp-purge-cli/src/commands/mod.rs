pub mod run;
pub mod sites;
pub mod window;

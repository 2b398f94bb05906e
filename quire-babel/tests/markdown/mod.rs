mod documents;
mod scenarios;
mod structure;

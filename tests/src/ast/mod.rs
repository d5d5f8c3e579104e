mod mutate;
mod query;

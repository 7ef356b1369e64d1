mod common;

mod projections;
mod routing;

mod extract;
mod properties;

//! End-to-end tests for `crprobe`, run against a local mock HTTP server.

#[cfg(test)]
mod probing {
    mod integration;
}

#[cfg(test)]
mod admin {
    mod integration;
}

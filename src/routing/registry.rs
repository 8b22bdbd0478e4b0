//! Hot-swappable compiled route structure.
//!
//! Readers load the current tree without locking; `reload` compiles a new
//! table and swaps it in only when the build succeeds.

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde_json::Value;

use crate::config::schema::RoutesConfig;
use crate::routing::error::RouteResult;
use crate::routing::table::RouteTable;
use crate::routing::tree::RouteNode;

/// Holder of the most recent successfully built structure.
#[derive(Debug)]
pub struct CompiledRoutes<H> {
    current: ArcSwap<RouteNode<H>>,
}

impl<H: Clone> CompiledRoutes<H> {
    /// Compile `table`; fails if the table doesn't build.
    pub fn new(table: &RouteTable<H>) -> RouteResult<Self> {
        let tree = table.structure()?;
        Ok(Self {
            current: ArcSwap::from_pointee(tree),
        })
    }

    /// Snapshot of the current structure.
    pub fn load(&self) -> Arc<RouteNode<H>> {
        self.current.load_full()
    }

    /// Rebuild from `table`. On error the previous structure stays active.
    pub fn reload(&self, table: &RouteTable<H>) -> RouteResult<Arc<RouteNode<H>>> {
        match table.structure() {
            Ok(tree) => {
                let tree = Arc::new(tree);
                self.current.store(Arc::clone(&tree));
                tracing::info!(endpoints = tree.endpoints().len(), "Route structure swapped");
                Ok(tree)
            }
            Err(e) => {
                tracing::error!(error = %e, "Route rebuild failed; keeping current structure");
                Err(e)
            }
        }
    }
}

impl CompiledRoutes<Value> {
    /// Rebuild from a reloaded route file. Failures are logged once and the
    /// previous structure stays active.
    pub fn reload_config(&self, config: RoutesConfig) -> RouteResult<Arc<RouteNode<Value>>> {
        let table = config.into_table().map_err(|e| {
            tracing::error!(error = %e, "Route file rejected; keeping current structure");
            e
        })?;
        self.reload(&table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;

    use serde_json::json;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logged_during(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, f);

        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn config(pairs: &[(&str, i64)]) -> RoutesConfig {
        RoutesConfig {
            routes: pairs.iter().map(|(k, v)| (k.to_string(), json!(v))).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_reload_config_failures_logged_once() {
        let compiled = CompiledRoutes::new(&config(&[("GET /a", 1)]).into_table().unwrap()).unwrap();

        // conflict found while building
        let log = logged_during(|| {
            assert!(compiled.reload_config(config(&[("GET /x", 1), ("GET|POST /x", 2)])).is_err());
        });
        assert_eq!(log.matches("keeping current structure").count(), 1, "{log}");

        // conflict found while converting the file
        let log = logged_during(|| {
            assert!(compiled.reload_config(config(&[("GET /x", 1), ("GET   /x", 2)])).is_err());
        });
        assert_eq!(log.matches("keeping current structure").count(), 1, "{log}");

        assert!(compiled.load().child("a").is_some());
    }

    #[test]
    fn test_reload_config_swaps() {
        let compiled = CompiledRoutes::new(&config(&[("GET /a", 1)]).into_table().unwrap()).unwrap();
        let tree = compiled.reload_config(config(&[("GET /b", 2)])).unwrap();

        assert!(tree.child("b").is_some());
        assert!(compiled.load().child("a").is_none());
    }

    #[test]
    fn test_reload_swaps_on_success() {
        let mut table = RouteTable::new();
        table.add_get("/a", 1);
        let compiled = CompiledRoutes::new(&table).unwrap();
        let before = compiled.load();

        table.add_get("/b", 2);
        compiled.reload(&table).unwrap();

        assert!(before.child("b").is_none());
        assert!(compiled.load().child("b").is_some());
    }

    #[test]
    fn test_reload_keeps_previous_on_error() {
        let mut table = RouteTable::new();
        table.add_get("/a", 1);
        let compiled = CompiledRoutes::new(&table).unwrap();

        table.insert("/broken", 2);
        assert!(compiled.reload(&table).is_err());
        assert!(compiled.load().child("a").is_some());
    }
}

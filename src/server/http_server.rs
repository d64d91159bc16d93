//! Listener lifecycle for an [`AppService`](super::AppService).
//!
//! ```rust,no_run
//! use brrthooks::app::{attach_handler, App};
//! use brrthooks::response::HttpResponse;
//! use brrthooks::server::{AppService, HttpServer};
//! use http::Method;
//! use std::sync::Arc;
//!
//! let app = App::new(vec![attach_handler(Method::GET, "/ping", |_ctx| HttpResponse::ok("pong"))]);
//! let handle = HttpServer(AppService::new(Arc::new(app))).start("127.0.0.1:8080")?;
//! handle.wait_ready()?;
//! handle.stop();
//! # Ok::<(), std::io::Error>(())
//! ```

use may::coroutine::JoinHandle;
use may_minihttp::HttpService;
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const READY_TIMEOUT: Duration = Duration::from_millis(250);
const READY_POLL: Duration = Duration::from_millis(5);

/// Binds a `may_minihttp` service (normally [`AppService`](super::AppService))
/// to a socket.
pub struct HttpServer<T>(pub T);

/// A bound listener and the coroutine accepting on it.
pub struct ServerHandle {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ServerHandle {
    /// Resolved listen address.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Block until a TCP connect to [`addr`](Self::addr) succeeds.
    ///
    /// # Errors
    ///
    /// `TimedOut` when the listener does not accept within 250ms.
    pub fn wait_ready(&self) -> io::Result<()> {
        self.wait_ready_for(READY_TIMEOUT)
    }

    /// [`wait_ready`](Self::wait_ready) with a caller-chosen deadline.
    ///
    /// # Errors
    ///
    /// `TimedOut` when the listener does not accept before `timeout`.
    pub fn wait_ready_for(&self, timeout: Duration) -> io::Result<()> {
        let started = Instant::now();
        loop {
            if TcpStream::connect(self.addr).is_ok() {
                debug!(
                    addr = %self.addr,
                    waited_us = started.elapsed().as_micros(),
                    "Listener accepting"
                );
                return Ok(());
            }
            if started.elapsed() >= timeout {
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("listener on {} not ready after {timeout:?}", self.addr),
                ));
            }
            thread::sleep(READY_POLL);
        }
    }

    /// Cancel the accept coroutine and wait for it to unwind.
    pub fn stop(self) {
        // SAFETY: the coroutine is owned by this handle and joined right after.
        unsafe {
            self.handle.coroutine().cancel();
        }
        match self.handle.join() {
            Ok(()) => info!(addr = %self.addr, "HTTP server stopped"),
            // cancellation unwinds the coroutine, so a panic payload is expected
            Err(_) => debug!(addr = %self.addr, "HTTP server coroutine cancelled"),
        }
    }

    /// Run until the accept coroutine exits.
    ///
    /// # Errors
    ///
    /// Returns the panic payload if the coroutine panicked.
    pub fn join(self) -> std::thread::Result<()> {
        let addr = self.addr;
        self.handle.join().inspect_err(|_| {
            warn!(addr = %addr, "HTTP server coroutine panicked");
        })
    }
}

impl<T: HttpService + Clone + Send + Sync + 'static> HttpServer<T> {
    /// Bind the first address `addr` resolves to and start accepting.
    ///
    /// # Errors
    ///
    /// Resolution failures, an address that resolves to nothing, or a bind
    /// error such as `AddrInUse`.
    pub fn start<A: ToSocketAddrs>(self, addr: A) -> io::Result<ServerHandle> {
        let addr = addr.to_socket_addrs()?.next().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "address resolved to nothing")
        })?;
        let handle = may_minihttp::HttpServer(self.0).start(addr)?;
        info!(addr = %addr, "HTTP server started");
        Ok(ServerHandle { addr, handle })
    }
}

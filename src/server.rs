use std::io::Read;
use std::net::{SocketAddr, TcpListener, TcpStream};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::config::ServerConfig;
use crate::util;

const READ_BUF_SIZE: usize = 1024;

/// A bound, listening socket. `TcpListener::bind` creates, binds and
/// listens in one step, with the platform's maximum backlog.
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
}

impl Server {
    pub fn bind(config: &ServerConfig) -> Result<Self> {
        let addr = (config.bind.ip(), config.port);
        let listener = TcpListener::bind(addr).with_context(|| {
            format!("Error binding socket on {}:{}", config.bind.ip(), config.port)
        })?;
        info!("Listening on {}", listener.local_addr()?);
        Ok(Server { listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept clients one at a time, forever. Each client is drained on
    /// this same thread; a second connection waits in the OS backlog
    /// until the current one hangs up. Never returns under normal
    /// operation.
    pub fn serve(&self) -> Result<()> {
        loop {
            let (stream, peer) = match self.listener.accept() {
                Ok(o) => o,
                Err(e) => {
                    warn!("accept failed: {}", e);
                    continue;
                }
            };
            info!("Client connected: {}", peer);
            let received = drain_client(stream, peer);
            info!("Client {} disconnected ({} bytes received)", peer, received);
        }
    }
}

/// Read until end-of-stream, logging each chunk. A read error ends the
/// connection the same way a clean close does. Nothing is ever written
/// back; the socket closes on drop.
fn drain_client(mut stream: TcpStream, peer: SocketAddr) -> u64 {
    let mut buffer = [0u8; READ_BUF_SIZE];
    let mut total: u64 = 0;
    loop {
        let n = match stream.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                debug!("read from {} failed: {}", peer, e);
                break;
            }
        };
        total += n as u64;
        info!("Received data from {} > {}", peer, util::printable(&buffer[..n]));
    }
    total
}

//! TCP byte-frame transports
//!
//! A reference driver pair for running the dispatcher over a real socket:
//! the device side listens and serves a single client at a time, the host
//! side connects out. Frames are fixed-size and cross the stream verbatim;
//! sealing, addressing and validation stay in the core's shared transport
//! layer, exactly as over the loopback link.
//!
//! Both ends run the socket in non-blocking mode. `delegate_try_receive`
//! only consumes bytes once a whole frame is buffered, so a slow peer can
//! never leave a frame half-read.

use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};

use taskwire_core::errors::{Result, TaskwireError, TransportError};
use taskwire_core::transport::Transport;

fn io_result<T>(result: std::io::Result<T>) -> Result<T> {
    result.map_err(|err| TaskwireError::Transport(TransportError::Io(err)))
}

// ----------------------------------------------------------------------------
// Server Side (device)
// ----------------------------------------------------------------------------

/// Listening transport serving one client connection at a time.
///
/// A new connection replaces a dead one; while no client is connected,
/// receives report "no frame" and sends are dropped on the floor, matching
/// the fire-and-forget wire contract.
pub struct TcpServerTransport {
    listener: TcpListener,
    client: Option<TcpStream>,
}

impl TcpServerTransport {
    /// Bind the listening socket
    pub fn bind<A: ToSocketAddrs>(addr: A) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        Ok(Self {
            listener,
            client: None,
        })
    }

    /// The bound address (useful with port 0)
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Whether a client is currently connected
    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// Accept a pending connection, if any
    fn poll_accept(&mut self) -> Result<()> {
        if self.client.is_some() {
            return Ok(());
        }
        match self.listener.accept() {
            Ok((stream, _)) => {
                io_result(stream.set_nonblocking(true))?;
                io_result(stream.set_nodelay(true))?;
                self.client = Some(stream);
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::WouldBlock => Ok(()),
            Err(err) => Err(TaskwireError::Transport(TransportError::Io(err))),
        }
    }
}

impl Transport for TcpServerTransport {
    fn delegate_try_receive(&mut self, frame: &mut [u8]) -> Result<bool> {
        self.poll_accept()?;
        let Some(client) = self.client.as_mut() else {
            return Ok(false);
        };
        match try_read_frame(client, frame) {
            Ok(filled) => Ok(filled),
            Err(_) => {
                // Client went away; drop it and wait for the next one.
                self.client = None;
                Ok(false)
            }
        }
    }

    fn delegate_send(&mut self, frame: &[u8]) -> Result<()> {
        self.poll_accept()?;
        let Some(client) = self.client.as_mut() else {
            return Ok(());
        };
        if write_frame(client, frame).is_err() {
            self.client = None;
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Client Side (host)
// ----------------------------------------------------------------------------

/// Outbound transport connecting to a listening device
pub struct TcpClientTransport {
    stream: TcpStream,
}

impl TcpClientTransport {
    /// Connect to the device
    pub fn connect<A: ToSocketAddrs>(addr: A) -> std::io::Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nonblocking(true)?;
        stream.set_nodelay(true)?;
        Ok(Self { stream })
    }
}

impl Transport for TcpClientTransport {
    fn delegate_try_receive(&mut self, frame: &mut [u8]) -> Result<bool> {
        try_read_frame(&mut self.stream, frame)
    }

    fn delegate_send(&mut self, frame: &[u8]) -> Result<()> {
        write_frame(&mut self.stream, frame)
    }
}

// ----------------------------------------------------------------------------
// Frame I/O
// ----------------------------------------------------------------------------

/// Read one whole frame if the socket has buffered it; consume nothing
/// otherwise
fn try_read_frame(stream: &mut TcpStream, frame: &mut [u8]) -> Result<bool> {
    match stream.peek(frame) {
        Ok(0) => Err(TaskwireError::link_closed("peer closed the connection")),
        Ok(n) if n < frame.len() => Ok(false),
        Ok(_) => {
            io_result(stream.read_exact(frame))?;
            Ok(true)
        }
        Err(err) if err.kind() == ErrorKind::WouldBlock => Ok(false),
        Err(err) => Err(TaskwireError::Transport(TransportError::Io(err))),
    }
}

/// Write one whole frame, retrying through short non-blocking writes
fn write_frame(stream: &mut TcpStream, frame: &[u8]) -> Result<()> {
    let mut written = 0;
    while written < frame.len() {
        match stream.write(&frame[written..]) {
            Ok(0) => return Err(TaskwireError::link_closed("peer closed the connection")),
            Ok(n) => written += n,
            Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
            Err(err) => return Err(TaskwireError::Transport(TransportError::Io(err))),
        }
    }
    io_result(stream.flush())
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

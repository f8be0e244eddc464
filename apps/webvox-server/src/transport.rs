//! TCP line transport.
//!
//! One reader thread and one writer thread per connection. Readers parse
//! inbound lines into self-contained commands and queue them as tasks for
//! the simulation loop; they never touch bridge state. Writers drain a
//! per-connection channel, so sends from the simulation context never
//! block. A line that fails to parse closes its connection.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use crossbeam::channel::{self, Receiver, Sender};
use tracing::{debug, info, warn};
use webvox_bridge::{ClientId, LineSink, Task};
use webvox_proto::ClientCommand;

/// Outbound half of a connection: an unbounded channel drained by the
/// writer thread. Sending to a closed connection is a silent no-op.
struct ChannelSink(Sender<String>);

impl LineSink for ChannelSink {
    fn send_line(&self, line: &str) {
        let _ = self.0.try_send(line.to_string());
    }
}

/// Bind the listener and spawn the accept loop.
pub fn listen(port: u16, tasks: Sender<Task>) -> std::io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port))?;
    thread::Builder::new()
        .name("webvox-accept".into())
        .spawn(move || accept_loop(&listener, &tasks))?;
    Ok(())
}

fn accept_loop(listener: &TcpListener, tasks: &Sender<Task>) {
    let mut next_id: u64 = 1;
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let id = ClientId(next_id);
                next_id += 1;
                if let Err(err) = spawn_connection(id, stream, tasks.clone()) {
                    warn!(client = %id, %err, "failed to start connection threads");
                }
            }
            Err(err) => warn!(%err, "accept error"),
        }
    }
}

fn spawn_connection(id: ClientId, stream: TcpStream, tasks: Sender<Task>) -> std::io::Result<()> {
    stream.set_nodelay(true)?;
    let peer = stream.peer_addr()?;
    info!(client = %id, %peer, "client connected");

    let (out_tx, out_rx) = channel::unbounded();
    let writer = stream.try_clone()?;

    // Attach before any command can be read: the task queue is FIFO per
    // connection, so the bridge sees the session first.
    let _ = tasks.send(Task::Attach {
        id,
        sink: Box::new(ChannelSink(out_tx)),
    });

    thread::Builder::new()
        .name(format!("webvox-write-{}", id.0))
        .spawn(move || write_loop(writer, &out_rx))?;

    thread::Builder::new()
        .name(format!("webvox-read-{}", id.0))
        .spawn(move || read_loop(id, stream, &tasks))?;

    Ok(())
}

fn write_loop(mut stream: TcpStream, lines: &Receiver<String>) {
    for line in lines {
        if stream.write_all(line.as_bytes()).is_err() || stream.write_all(b"\n").is_err() {
            break;
        }
    }
}

fn read_loop(id: ClientId, stream: TcpStream, tasks: &Sender<Task>) {
    let reader = BufReader::new(stream);
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                debug!(client = %id, %err, "read error");
                break;
            }
        };
        match ClientCommand::parse(&line) {
            Ok(command) => {
                let _ = tasks.send(Task::Command { id, command });
            }
            Err(err) => {
                // Malformed frames are fatal for the connection.
                warn!(client = %id, %err, "malformed frame, closing connection");
                break;
            }
        }
    }

    info!(client = %id, "client disconnected");
    let _ = tasks.send(Task::Detach { id });
}

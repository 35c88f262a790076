//! Basic usage: a host registers a task on a device and reads the result
//!
//! Wires a device (board id 0x00) and a simulated host (board id 0x01)
//! over an in-memory loopback link, then drives one full round trip:
//! register → execute across passes → result packet back to the host.
//!
//! Run with: `cargo run --example basic_usage`

use taskwire_harness::loopback::loopback_pair;
use taskwire_harness::tasks::{EchoTask, PingTask, SweepTask};

use taskwire_core::channel::ExternalChannel;
use taskwire_core::RegisteredTask;
use taskwire_core::config::ProtocolConfig;
use taskwire_core::envelope::Envelope;
use taskwire_core::manager::TaskManager;
use taskwire_core::protocol::{
    Crc32, FramedPacket, HeaderFields, HeaderFlag, PacketHeader, WirePacket,
};
use taskwire_core::status::StatusCode;
use taskwire_core::task_set;
use taskwire_core::transport::{Hub, TransportExt};
use taskwire_core::types::DeviceId;

type Packet = FramedPacket<Crc32, 32>;

const DEVICE: DeviceId = DeviceId::BOARD;
const HOST: DeviceId = DeviceId::new(0x01);

fn main() {
    env_logger::init();

    // --- device side -------------------------------------------------------
    let (mut host_link, device_link) = loopback_pair();
    let mut manager = TaskManager::new(task_set![PingTask, SweepTask, EchoTask]);
    let config = ProtocolConfig::point_to_point(DEVICE);
    config.validate().expect("protocol config");
    let mut hub = Hub::from_config(&config);
    hub.attach(Box::new(device_link));
    let external = ExternalChannel::<Packet>::new(hub).into_handle();

    // --- host side: register a 3-step sweep --------------------------------
    let params = Envelope::packed(&3u32).expect("encode params");
    let header = PacketHeader::build(HeaderFields::data(HeaderFlag::None, true, DEVICE), HOST);
    let mut request = Packet::with_payload(header, SweepTask::UID, StatusCode::OK, params.data());
    host_link.send(&mut request).expect("send request");
    println!("host: registered sweep task {}", SweepTask::UID);

    // --- device main loop ---------------------------------------------------
    // One poll+update per iteration; the sweep needs a few passes to finish.
    for pass in 1..=8 {
        ExternalChannel::update(&external, &mut manager).expect("channel update");
        manager.update();

        if let Some(reply) = host_link.try_receive::<Packet>(HOST).expect("host receive") {
            let (executed, suspensions): (u32, u32) =
                Envelope::from_vec(reply.payload().to_vec())
                    .unpack()
                    .expect("decode result");
            println!(
                "host: pass {pass}: result {} — executed {executed} times, suspended {suspensions} times",
                reply.status_code()
            );
            assert_eq!(reply.status_code(), StatusCode::TASK_FINISHED);
            return;
        }
        println!("device: pass {pass}: {} task(s) active", manager.active_tasks());
    }
    panic!("sweep task did not complete");
}

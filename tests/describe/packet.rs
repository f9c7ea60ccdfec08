//! Describing advertising data with the registry

#[path = "../common/mod.rs"]
mod common;

use bluenumbers::describe::{describe, ValueDescription};
use bluenumbers::gap::assigned::local_name::LocalName;
use bluenumbers::gap::assigned::manufacturer_data::ManufacturerData;
use bluenumbers::gap::{AdPacket, AdStruct};
use bluenumbers::Registry;
use common::Snapshot;

const RAW: &[u8] = &[
    2, 0x01, 0x06, // flags
    5, 0x03, 0x00, 0x2A, 0x0F, 0x18, // complete list of 16 bit UUIDs
    6, 0x09, b'S', b'e', b'n', b's', b'e', // complete local name
    5, 0xFF, 0x4C, 0x00, 0x02, 0x15, // manufacturer data
    3, 0x0A, 0xF4, 0xFF, // TX power level (not decoded)
];

#[test]
fn describe_packet() {
    let snapshot = Snapshot::new();
    let registry = Registry::local(snapshot.path());

    let packet = AdPacket::from_bytes(RAW);

    let description = describe(&registry, &packet).unwrap();

    assert_eq!(Some("Sense".to_string()), description.name);
    assert_eq!(5, description.structs.len());

    let flags = &description.structs[0];

    assert_eq!(Some("Flags"), flags.ad_type_name.as_deref());
    assert_eq!("06", flags.data);

    match &flags.value {
        Some(ValueDescription::Flags { bits, labels }) => {
            assert_eq!(0x06, *bits);
            assert_eq!(2, labels.len());
        }
        other => panic!("unexpected value {:?}", other),
    }

    match &description.structs[1].value {
        Some(ValueDescription::Uuids { uuids }) => {
            let names: Vec<_> = uuids.iter().map(|uuid| uuid.name.as_deref()).collect();

            // list UUIDs keep the order they were sent in
            assert_eq!(vec![None, Some("Battery")], names);
            assert_eq!("00002a00-0000-1000-8000-00805f9b34fb", uuids[0].uuid);
            assert_eq!("0000180f-0000-1000-8000-00805f9b34fb", uuids[1].uuid);
        }
        other => panic!("unexpected value {:?}", other),
    }

    match &description.structs[3].value {
        Some(ValueDescription::ManufacturerData {
            company_identifier,
            company_name,
            data,
        }) => {
            assert_eq!(0x004C, *company_identifier);
            assert_eq!(Some("Apple, Inc."), company_name.as_deref());
            assert_eq!("0215", data);
        }
        other => panic!("unexpected value {:?}", other),
    }

    let tx_power = &description.structs[4];

    assert_eq!(None, tx_power.ad_type_name);
    assert_eq!(None, tx_power.value);
    assert_eq!(None, tx_power.error);
}

#[test]
fn undecodable_struct_keeps_its_error() {
    let snapshot = Snapshot::new();
    let registry = Registry::local(snapshot.path());

    // a 16 bit UUID list with an odd number of bytes
    let packet: AdPacket = [AdStruct::new(0x03, &[0x0F, 0x18, 0x0A]).unwrap()].into_iter().collect();

    let description = describe(&registry, &packet).unwrap();

    assert_eq!(None, description.structs[0].value);
    assert!(description.structs[0].error.is_some());
}

#[test]
fn built_packet_round_trip() {
    let snapshot = Snapshot::new();
    let registry = Registry::local(snapshot.path());

    let packet: AdPacket = [
        AdStruct::from_local(&LocalName::new("Nordic", true)).unwrap(),
        AdStruct::from_local(&ManufacturerData::new(0x0059, vec![1, 2, 3])).unwrap(),
    ]
    .into_iter()
    .collect();

    assert_eq!(packet, AdPacket::try_from_bytes(&packet.to_bytes()).unwrap());

    let description = describe(&registry, &packet).unwrap();

    assert_eq!(Some("Nordic".to_string()), description.name);

    match &description.structs[1].value {
        Some(ValueDescription::ManufacturerData { company_name, .. }) => {
            assert_eq!(Some("Nordic Semiconductor ASA"), company_name.as_deref())
        }
        other => panic!("unexpected value {:?}", other),
    }
}

#[test]
fn text_and_json_output() {
    let snapshot = Snapshot::new();
    let registry = Registry::local(snapshot.path());

    let description = describe(&registry, &AdPacket::from_bytes(RAW)).unwrap();

    let text = description.to_string();

    assert!(text.starts_with("name: Sense\n"));
    assert!(text.contains("0x01 Flags: 06"));
    assert!(text.contains("0000180f-0000-1000-8000-00805f9b34fb (Battery)"));
    assert!(text.contains("0x004c (Apple, Inc.): 0215"));

    let json = serde_json::to_value(&description).unwrap();

    assert_eq!("flags", json["structs"][0]["value"]["kind"]);
    assert_eq!("Apple, Inc.", json["structs"][3]["value"]["company_name"]);
}

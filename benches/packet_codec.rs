use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rakframe::{EncapsulatedPacket, PacketReader, SplitHeader};

fn encode_benchmark(c: &mut Criterion) {
    let packet = EncapsulatedPacket::reliable_ordered(vec![0xa5; 1024], 1, 2, 3)
        .with_split(SplitHeader::new(4, 7, 2));

    c.bench_function("wire encode", |b| {
        b.iter(|| {
            let mut buffer = Vec::with_capacity(packet.wire_size());
            packet.to_wire(&mut buffer).unwrap();
            black_box(buffer);
        })
    });
}

fn decode_benchmark(c: &mut Criterion) {
    let packet = EncapsulatedPacket::reliable_ordered(vec![0xa5; 1024], 1, 2, 3)
        .with_split(SplitHeader::new(4, 7, 2));
    let mut buffer = Vec::new();
    packet.to_wire(&mut buffer).unwrap();

    c.bench_function("wire decode", |b| {
        b.iter(|| {
            let mut reader = PacketReader::new(buffer.as_slice());
            black_box(EncapsulatedPacket::from_wire(&mut reader).unwrap());
        })
    });
}

fn size_prediction_benchmark(c: &mut Criterion) {
    let packets: Vec<EncapsulatedPacket> = (0..32)
        .map(|index| EncapsulatedPacket::reliable_ordered(vec![0xa5; 256], index, index, 0))
        .collect();

    c.bench_function("wire size prediction", |b| {
        b.iter(|| {
            let total: usize = packets.iter().map(EncapsulatedPacket::wire_size).sum();
            black_box(total);
        })
    });
}

criterion_group!(
    benches,
    encode_benchmark,
    decode_benchmark,
    size_prediction_benchmark
);
criterion_main!(benches);

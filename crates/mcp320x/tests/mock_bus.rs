use embedded_hal_mock::eh1::spi::{Mock, Transaction};
use mcp320x::mcp3204::{self, Mcp3204};
use mcp320x::mcp3208::{self, Mcp3208};

fn conversion(command: [u8; 3], response: [u8; 3]) -> [Transaction<u8>; 3] {
    [
        Transaction::transaction_start(),
        Transaction::transfer_in_place(command.to_vec(), response.to_vec()),
        Transaction::transaction_end(),
    ]
}

#[test]
fn mcp3208_single_ended_sweep() {
    let expectations: Vec<_> = (0..8u8)
        .flat_map(|channel| {
            let command = [0x06 | (channel >> 2), (channel & 0b11) << 6, 0x00];
            conversion(command, [0x00, 0x00, channel * 16])
        })
        .collect();

    let mut mcp = Mcp3208::new(Mock::new(&expectations));

    for (index, channel) in mcp3208::Channel::all().enumerate() {
        assert_eq!(mcp.read(channel).unwrap(), index as u16 * 16);
    }

    mcp.destroy().done();
}

#[test]
fn mcp3208_raw_reads() {
    let expectations: Vec<_> = [
        conversion([0x06, 0x00, 0x00], [0x00, 0x00, 0x00]),
        conversion([0x07, 0x40, 0x00], [0xFF, 0xFA, 0xFF]),
        conversion([0x04, 0xC0, 0x00], [0x00, 0x0F, 0xFF]),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut mcp = Mcp3208::new(Mock::new(&expectations));

    assert_eq!(mcp.get_raw_data(true, 0).unwrap(), 0);
    assert_eq!(mcp.get_raw_data(true, 5).unwrap(), 2815);
    assert_eq!(mcp.get_raw_data(false, 3).unwrap(), 4095);

    mcp.destroy().done();
}

#[test]
fn mcp3204_differential() {
    let expectations: Vec<_> = [
        conversion([0x04, 0x40, 0x00], [0x00, 0x08, 0x00]),
        conversion([0x04, 0x80, 0x00], [0x00, 0x01, 0x02]),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut mcp = Mcp3204::new(Mock::new(&expectations));

    assert_eq!(mcp.read_differential(mcp3204::Channel::CH1).unwrap(), 2048);
    assert_eq!(mcp.read_with_mode(mcp3204::Channel::CH2, false).unwrap(), 0x0102);

    mcp.destroy().done();
}

//! ### Cust_ID0 / Cust_ID1 / Cust_ID2 - Customer ID words (`0x00`, `0x0E`, `0x13`, R/W)
//!
//! Free-form words with no effect on operation. From the factory they carry the die's traceability
//! information, which [`FactoryId`] unpacks.
#![doc(alias = "Cust_ID0")]
#![doc(alias = "Cust_ID1")]
#![doc(alias = "Cust_ID2")]
use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker struct for the Cust_ID0 (0x00) register
pub struct CustId0;
impl Reg for CustId0 { const ADDR: u8 = 0x00; }

/// Marker struct for the Cust_ID1 (0x0E) register
pub struct CustId1;
impl Reg for CustId1 { const ADDR: u8 = 0x0E; }

/// Marker struct for the Cust_ID2 (0x13) register
pub struct CustId2;
impl Reg for CustId2 { const ADDR: u8 = 0x13; }

impl Readable for CustId0 {
    type Out = u16;
    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> { Ok(word) }
}

impl Writable for CustId0 {
    type In = u16;
    fn encode(v: &Self::In) -> u16 { *v }
}

impl Readable for CustId1 {
    type Out = u16;
    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> { Ok(word) }
}

impl Writable for CustId1 {
    type In = u16;
    fn encode(v: &Self::In) -> u16 { *v }
}

impl Readable for CustId2 {
    type Out = u16;
    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> { Ok(word) }
}

impl Writable for CustId2 {
    type In = u16;
    fn encode(v: &Self::In) -> u16 { *v }
}

/// Die traceability information packed into the factory-programmed customer ID words.
///
/// This is a read-only view; nothing in the driver ever writes it back.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FactoryId {
    pub lot_number: u32,
    pub wafer_number: u8,
    pub wafer_x_coordinate: u8,
    pub wafer_y_coordinate: u16,
}

impl FactoryId {
    /// Unpacks the three customer ID words, in register order (Cust_ID0, Cust_ID1, Cust_ID2).
    pub fn from_customer_ids(cust_id0: u16, cust_id1: u16, cust_id2: u16) -> Self {
        Self {
            lot_number: ((cust_id2 as u32) << 3) | ((cust_id0 as u32) >> 13),
            wafer_number: ((cust_id0 >> 8) & 0x1F) as u8,
            wafer_x_coordinate: (cust_id0 & 0x7F) as u8,
            wafer_y_coordinate: cust_id1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_id_unpack() {
        let id = FactoryId::from_customer_ids(0x1234, 0x0056, 0x0078);
        assert_eq!(0x34, id.wafer_x_coordinate);
        assert_eq!(0x12, id.wafer_number);
        assert_eq!(0x56, id.wafer_y_coordinate);
        assert_eq!(0x3C0, id.lot_number);
    }

    #[test]
    fn factory_id_lot_number_spans_both_words() {
        // Top 3 bits of Cust_ID0 are the low bits of the lot number
        let id = FactoryId::from_customer_ids(0b1110_0000_0000_0000, 0, 0xFFFF);
        assert_eq!(0x7FFFF, id.lot_number);
        assert_eq!(0, id.wafer_number);
        assert_eq!(0, id.wafer_x_coordinate);
    }

    #[test]
    fn cust_id_words_pass_through() {
        assert_eq!(0xBEEF, CustId1::decode(0xBEEF).unwrap());
        assert_eq!(0xBEEF, CustId2::encode(&0xBEEF));
        assert_eq!(0x13, CustId2::ADDR);
    }
}

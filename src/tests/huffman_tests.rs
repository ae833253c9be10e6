//! Unit tests for Huffman code books and granule coding

use crate::bitstream::BitstreamWriter;
use crate::huffman::*;
use crate::tables::{HuffmanTable, COUNT1_TABLES, HUFFMAN_TABLES};
use crate::types::{GranuleInfo, GRANULE_SIZE};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_complete_prefix_code(index: usize, h: &HuffmanTable) {
        let entries = (h.xlen * h.ylen) as usize;
        assert_eq!(h.codes.len(), entries, "table {}", index);
        assert_eq!(h.lengths.len(), entries, "table {}", index);

        let mut kraft = 0u64;
        for i in 0..entries {
            let (ci, li) = (u64::from(h.codes[i]), u32::from(h.lengths[i]));
            assert!(li > 0 && li <= 19, "table {} entry {} length {}", index, i, li);
            assert!(ci >> li == 0, "table {} entry {} code too wide", index, i);
            kraft += 1 << (32 - li);

            for j in 0..entries {
                let (cj, lj) = (u64::from(h.codes[j]), u32::from(h.lengths[j]));
                if i != j && li <= lj {
                    assert_ne!(cj >> (lj - li), ci, "table {}: {} prefixes {}", index, i, j);
                }
            }
        }
        assert_eq!(kraft, 1 << 32, "table {} is not complete", index);
    }

    #[test]
    fn test_code_books_are_complete_prefix_codes() {
        for (index, table) in HUFFMAN_TABLES.iter().enumerate() {
            if let Some(h) = table {
                assert_complete_prefix_code(index, h);
            }
        }
        for (index, h) in COUNT1_TABLES.iter().enumerate() {
            assert_complete_prefix_code(32 + index, h);
        }
    }

    #[test]
    fn test_unused_table_slots() {
        for index in [0, 4, 14] {
            assert!(HUFFMAN_TABLES[index].is_none());
        }
        assert_eq!(HUFFMAN_TABLES[16].as_ref().map(|h| h.linmax), Some(1));
        assert_eq!(HUFFMAN_TABLES[23].as_ref().map(|h| h.linbits), Some(13));
        assert_eq!(HUFFMAN_TABLES[24].as_ref().map(|h| h.linmax), Some(15));
    }

    #[test]
    fn test_write_pair_table_1() {
        let mut bs = BitstreamWriter::default();
        write_pair(&mut bs, 1, 1, 0).unwrap();
        assert_eq!(bs.bits_count(), 3);
        // code 01 then a positive sign
        assert_eq!(bs.finish().unwrap(), vec![0x40]);

        let mut bs = BitstreamWriter::default();
        write_pair(&mut bs, 1, -1, -1).unwrap();
        // code 000, both signs set
        assert_eq!(bs.finish().unwrap(), vec![0b0001_1000]);
    }

    #[test]
    fn test_write_pair_escape() {
        let h = HUFFMAN_TABLES[16].as_ref().unwrap();
        let mut bs = BitstreamWriter::default();

        write_pair(&mut bs, 16, 16, 0).unwrap();

        // code for (15, 0), one escape bit, one sign bit
        let expected = u32::from(h.lengths[15 * 16]) + 1 + 1;
        assert_eq!(bs.bits_count() as u32, expected);
    }

    #[test]
    fn test_write_pair_rejects_value_outside_book() {
        let mut bs = BitstreamWriter::default();
        assert!(write_pair(&mut bs, 1, 2, 0).is_err());
        assert!(write_pair(&mut bs, 16, 17, 0).is_err(), "escape of 2 needs two bits");
        assert!(write_pair(&mut bs, 0, 1, 0).is_err());
    }

    #[test]
    fn test_count_bits_outside_book() {
        let mut ix = [0i32; GRANULE_SIZE];
        ix[0] = 3;
        assert_eq!(count_bits(&ix, 0, 2, 1), u32::MAX);
        assert_eq!(count_bits(&ix, 0, 2, 0), 0);
    }

    #[test]
    fn test_choose_table() {
        let mut ix = [0i32; GRANULE_SIZE];
        assert_eq!(choose_table(&ix, 0, 32), 0);

        ix[3] = -1;
        assert_eq!(choose_table(&ix, 0, 32), 1);

        ix[5] = 3;
        let table = choose_table(&ix, 0, 32);
        assert!([5, 6].contains(&table), "table {}", table);

        ix[7] = 20;
        let table = choose_table(&ix, 0, 32);
        assert!([18, 24].contains(&table), "table {}", table);
        assert_ne!(count_bits(&ix, 0, 32, table), u32::MAX);
    }

    #[test]
    fn test_count1_bits_and_quads() {
        let mut ix = [0i32; GRANULE_SIZE];
        ix[0] = 1;
        ix[3] = -1;

        // table A: pattern 1001 has a 5 bit code
        assert_eq!(count1_bits(&ix, 0, 1), (5 + 2, 4 + 2));

        let mut bs = BitstreamWriter::default();
        write_quad(&mut bs, 1, &ix[..4]).unwrap();
        // pattern 1001 -> code 0110, signs 0 then 1
        assert_eq!(bs.finish().unwrap(), vec![0b0110_0100]);

        let mut bs = BitstreamWriter::default();
        write_quad(&mut bs, 0, &[0, 0, 0, 0]).unwrap();
        assert_eq!(bs.finish().unwrap(), vec![0x80]);
    }

    #[test]
    fn test_write_granule_pads_stuffing_with_ones() {
        let mut gi = GranuleInfo::default();
        gi.ix[0] = 1;
        gi.count1 = 1;
        gi.count1table_select = 1;
        // pattern 1000 in table B is 0111, plus a sign bit
        gi.part2_3_length = 5 + 11;

        let mut bs = BitstreamWriter::default();
        let bits = write_granule(&mut bs, &gi).unwrap();

        assert_eq!(bits, 5);
        assert_eq!(bs.bits_count(), 16);
        assert_eq!(bs.finish().unwrap(), vec![0b0111_0111, 0xFF]);
    }

    #[test]
    fn test_write_granule_rejects_short_length() {
        let mut gi = GranuleInfo::default();
        gi.ix[0] = 1;
        gi.count1 = 1;
        gi.part2_3_length = 2;

        let mut bs = BitstreamWriter::default();
        assert!(write_granule(&mut bs, &gi).is_err());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            failure_persistence: None,
            ..ProptestConfig::default()
        })]

        #[test]
        fn test_counted_bits_match_written_bits(
            values in prop::collection::vec(-40i32..=40, 32)
        ) {
            let mut ix = [0i32; GRANULE_SIZE];
            ix[..32].copy_from_slice(&values);

            let table = choose_table(&ix, 0, 32);
            let counted = count_bits(&ix, 0, 32, table);

            let mut bs = BitstreamWriter::default();
            if table != 0 {
                for pair in ix[..32].chunks_exact(2) {
                    write_pair(&mut bs, table, pair[0], pair[1]).unwrap();
                }
            }
            prop_assert_eq!(bs.bits_count() as u32, counted);
        }
    }
}

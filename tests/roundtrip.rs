//! Write a header and a batch of points, read them back, and check that everything matches.

use std::io::Cursor;

use geocore::point::Format;
use geocore::{Builder, Color, Point, Reader, Version, Vlr, Writer};

fn points(format: &Format) -> Vec<Point> {
    (0..50)
        .map(|i| Point {
            x: i as f64,
            y: -(i as f64),
            z: (i as f64) * 0.5,
            intensity: i as u16 * 100,
            return_number: 1,
            number_of_returns: 1,
            gps_time: if format.has_gps_time {
                Some(i as f64 * 1e-3)
            } else {
                None
            },
            color: if format.has_color {
                Some(Color::new(i as u16, 0, 255 - i as u16))
            } else {
                None
            },
            nir: if format.has_nir { Some(1000) } else { None },
            ..Default::default()
        })
        .collect()
}

fn roundtrip(version: Version, format_id: u8) {
    let format = Format::new(format_id).unwrap();
    let points = points(&format);

    let mut builder = Builder::default();
    builder.version = version;
    builder.point_format = format;
    let header = builder.into_header().unwrap();

    let mut writer = Writer::new(Cursor::new(Vec::new()), header).unwrap();
    writer.write_points(&points).unwrap();
    let cursor = writer.into_inner().unwrap();

    let mut reader = Reader::new(cursor).unwrap();
    assert_eq!(reader.header().version(), version);
    assert_eq!(*reader.header().point_format(), format);
    assert_eq!(reader.header().number_of_points(), points.len() as u64);

    let mut read_back = Vec::new();
    let count = reader.read_all_points_into(&mut read_back).unwrap();
    assert_eq!(count, points.len() as u64);
    assert_eq!(points, read_back);
}

#[test]
fn roundtrip_1_2_format_0() {
    roundtrip(Version::new(1, 2), 0);
}

#[test]
fn roundtrip_1_2_format_2() {
    roundtrip(Version::new(1, 2), 2);
}

#[test]
fn roundtrip_1_2_format_1() {
    roundtrip(Version::new(1, 2), 1);
}

#[test]
fn roundtrip_1_4_format_6() {
    roundtrip(Version::new(1, 4), 6);
}

#[test]
fn roundtrip_1_4_format_7() {
    roundtrip(Version::new(1, 4), 7);
}

#[test]
fn roundtrip_1_4_format_8() {
    roundtrip(Version::new(1, 4), 8);
}

#[test]
fn roundtrip_preserves_vlrs() {
    let mut builder = Builder::default();
    builder.version = Version::new(1, 4);
    let mut vlr = Vlr::default();
    vlr.user_id = "LASF_Projection".to_string();
    vlr.record_id = 2112;
    vlr.description = "a projection vlr".to_string();
    vlr.data = vec![1, 2, 3, 4];
    builder.vlrs.push(vlr);
    let header = builder.into_header().unwrap();

    let mut writer = Writer::new(Cursor::new(Vec::new()), header).unwrap();
    writer.write_point(Point::default()).unwrap();
    let cursor = writer.into_inner().unwrap();

    let reader = Reader::new(cursor).unwrap();
    let vlrs = reader.header().vlrs();
    assert_eq!(1, vlrs.len());
    assert_eq!("LASF_Projection", vlrs[0].user_id);
    assert_eq!(2112, vlrs[0].record_id);
    assert_eq!(vec![1, 2, 3, 4], vlrs[0].data);
}

#[test]
fn seek_to_last_point() {
    let points = points(&Format::default());
    let mut writer = Writer::default();
    writer.write_points(&points).unwrap();
    let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();

    reader.seek(points.len() as u64 - 1).unwrap();
    let last = reader.read_point().unwrap().unwrap();
    assert_eq!(points[points.len() - 1], last);
    assert!(reader.read_point().unwrap().is_none());
}

#[test]
fn seek_past_last_point_yields_none() {
    let points = points(&Format::default());
    let mut writer = Writer::default();
    writer.write_points(&points).unwrap();
    let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();

    reader.seek(points.len() as u64).unwrap();
    assert!(reader.read_point().unwrap().is_none());
}

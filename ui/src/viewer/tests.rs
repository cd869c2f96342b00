use ndview_core::range::RangeSource;

use super::*;

fn config(pane: u32) -> Config {
    let mut ret = Config::default();
    ret.gfx.pane_size = (pane, pane);
    ret
}

fn cube() -> Dataset<u16> {
    Dataset::from_fn("cube", vec![4, 3, 2], |idx| {
        (idx[0] + 10 * idx[1] + 100 * idx[2]) as u16
    })
}

#[test]
fn test_small_dataset_centered() {
    let ds = Dataset::from_fn("small", vec![10, 10], |idx| (idx[0] * idx[1]) as u8);
    let mut viewer = Viewer::new(ds, &Config::default()).unwrap();
    assert_eq!((-507, -507), viewer.viewport().origin());
    assert_eq!((0, 0), viewer.pixel_to_model((507, 507)));

    let raster = viewer.render().unwrap();
    assert_eq!((1024, 1024), (raster.width(), raster.height()));
    assert_eq!(0, viewer.last_report().flagged_cells);
    assert!(viewer.last_raster().is_some());
}

#[test]
fn test_pan_stops_at_edge() {
    let ds = Dataset::from_fn("small", vec![10, 10], |_| 0_u8);
    let mut viewer = Viewer::new(ds, &config(100)).unwrap();
    let mut steps = 0;
    while viewer.step_left() {
        steps += 1;
        assert!(steps < 100, "panned forever");
    }
    let origin = viewer.viewport().origin();
    // At least column 0 is still visible.
    assert!(origin.0 + 100 > 0);
    assert!(!viewer.pan_left(100));
    assert_eq!(origin, viewer.viewport().origin());
    assert!(viewer.step_right());
}

#[test]
fn test_degenerate_data_falls_back_to_type_bounds() {
    let ds = Dataset::from_fn("flat", vec![3, 3], |_| 7_u8);
    let viewer = Viewer::new(ds, &config(16)).unwrap();
    assert_eq!(RangeSource::Type, viewer.range().source());
    assert_eq!(Some(&(0, 255)), viewer.range().bounds());

    let mut cfg = config(16);
    cfg.ctrl.prefer_data_bounds = false;
    let ds = Dataset::from_fn("ramp", vec![3, 3], |idx| idx[0] as u8);
    let viewer = Viewer::new(ds, &cfg).unwrap();
    assert_eq!(RangeSource::Type, viewer.range().source());
}

#[test]
fn test_explode_along_axis() {
    let viewer = Viewer::new(cube(), &config(16)).unwrap();
    let slices = viewer.explode(2).unwrap();
    assert_eq!(2, slices.len());
    for (i, slice) in slices.iter().enumerate() {
        assert_eq!(&[4, 3], slice.dataset().dims());
        assert_eq!(format!("cube [Z={}]", i), slice.dataset().name());
        assert_eq!(
            Some(&((2 + 10 * 1 + 100 * i) as u16)),
            slice.dataset().get(&[2, 1])
        );
    }
    assert!(viewer.explode(3).is_err());
}

#[test]
fn test_positions_and_display_axes() {
    let mut viewer = Viewer::new(cube(), &config(16)).unwrap();
    assert!(viewer.set_position(2, 1));
    assert!(!viewer.set_position(2, 2));
    assert_eq!(&[0, 0, 1], viewer.plane().position());
    assert_eq!(0, viewer.step_position(2).unwrap());
    assert!(viewer.step_position(5).is_err());

    viewer.set_display_axes(0, Some(2)).unwrap();
    assert_eq!((4, 2), viewer.viewport().data_extent());
    assert!(viewer.set_display_axes(1, Some(1)).is_err());
    assert_eq!((0, Some(2)), viewer.plane().display_axes());
}

#[test]
fn test_grab_plane() {
    let mut viewer = Viewer::new(cube(), &config(16)).unwrap();
    assert!(viewer.set_position(2, 1));
    let grabbed = viewer.grab_plane().unwrap();
    assert_eq!(&[4, 3], grabbed.dataset().dims());
    assert_eq!(Some(&123), grabbed.dataset().get(&[3, 2]));
}

#[test]
fn test_snapshot() {
    let ds = Dataset::from_fn("small", vec![4, 4], |idx| idx[0] as u8).with_source("small.raw");
    let mut viewer = Viewer::new(ds, &config(8)).unwrap();
    assert!(viewer.last_raster().is_none());
    let snapshot = viewer.take_snapshot().unwrap();
    assert_eq!(&[8, 8], snapshot.dataset().dims());
    assert_eq!("Snapshot of small", snapshot.dataset().name());
    assert_eq!("small.raw", snapshot.dataset().source());
    let raster = viewer.last_raster().unwrap();
    assert_eq!(raster.get(5, 3).as_ref(), snapshot.dataset().get(&[5, 3]));
}

#[test]
fn test_to_float_keeps_view() {
    let ds = Dataset::from_fn("ramp", vec![20, 20], |idx| idx[0] as i32 - 10);
    let mut viewer = Viewer::new(ds, &config(10)).unwrap();
    assert!(viewer.increase_zoom());
    assert!(viewer.pan_down(6));
    let floats = viewer.to_float().unwrap();
    assert_eq!(viewer.viewport(), floats.viewport());
    assert_eq!(viewer.plane(), floats.plane());
    assert_eq!(Some(&(-10.0, 9.0)), floats.range().bounds());
}

#[test]
fn test_symmetric_range() {
    let ds = Dataset::from_fn("ramp", vec![5, 1], |idx| idx[0] as i32 - 1);
    let mut viewer = Viewer::new(ds, &config(8)).unwrap();
    assert!(viewer.use_symmetric_range());
    assert_eq!(Some(&(-3, 3)), viewer.range().bounds());
}

#[test]
fn test_symmetric_type_range() {
    let mut cfg = config(8);
    cfg.ctrl.prefer_data_bounds = false;
    let ds = Dataset::from_fn("signal", vec![4, 4], |idx| idx[0] as i16 - 2);
    let mut viewer = Viewer::new(ds, &cfg).unwrap();
    assert!(viewer.use_symmetric_range());
    assert_eq!(None, viewer.range().bounds());
    assert_eq!("32768", viewer.range().hp_max().to_string());
    assert!(viewer.render().is_ok());
}

#[test]
fn test_empty_dataset_is_rejected() {
    let ds = Dataset::<u8>::from_flat("empty", vec![0, 3], vec![]).unwrap();
    assert!(Viewer::new(ds, &config(8)).is_err());
}

#[test]
fn test_reset_view() {
    let ds = Dataset::from_fn("small", vec![10, 10], |_| 0_u8);
    let mut viewer = Viewer::new(ds, &config(100)).unwrap();
    let initial = viewer.viewport().clone();
    assert!(viewer.increase_zoom());
    assert!(viewer.step_up());
    viewer.resize_pane(50, 70);
    viewer.reset_view();
    assert_eq!(Scale::UNITY, viewer.viewport().scale());
    assert_ne!(initial, *viewer.viewport());
    viewer.resize_pane(100, 100);
    viewer.reset_view();
    assert_eq!(initial, *viewer.viewport());
    assert_eq!("1:1 at (-45, -45) on [*, *]", describe_view(&viewer));
}

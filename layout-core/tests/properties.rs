use atlas_core::{Bounds, Category, Footprint, cube_size_from_volume, height_from_volume};
use layout_core::{
    ConsumptionRecord, Dataset, DisplayMode, LayoutConfig, SceneMode, Volumes, build_scene,
    compose_comparison, country_max_depth, layout_country,
};

const EPS: f64 = 1e-9;

fn china() -> ConsumptionRecord {
    ConsumptionRecord::new(
        "CHN",
        Volumes::default()
            .with(Category::Water, 72.46)
            .with(Category::Energy, 10.0)
            .with(Category::Concrete, 2.84)
            .with(Category::Food, 0.43)
            .with(Category::Waste, 0.14),
    )
}

fn usa() -> ConsumptionRecord {
    ConsumptionRecord::new(
        "USA",
        Volumes::default()
            .with(Category::Water, 1543.2)
            .with(Category::Energy, 45.1)
            .with(Category::Concrete, 1.2)
            .with(Category::Food, 0.9)
            .with(Category::Waste, 0.8),
    )
}

#[test]
fn clamp_correctness() {
    let fp = Footprint::new(0.5, 0.25);
    for v in [None, Some(0.0), Some(-0.5), Some(-1e9), Some(f64::NAN)] {
        assert_eq!(cube_size_from_volume(v, Bounds::CUBE), Bounds::CUBE.min);
        assert_eq!(height_from_volume(v, fp, 1.0, Bounds::HEIGHT), Bounds::HEIGHT.min);
    }
    for v in [1000.5, 1e6, 1e300] {
        assert_eq!(cube_size_from_volume(Some(v), Bounds::CUBE), Bounds::CUBE.max);
    }
}

#[test]
fn volume_monotonicity() {
    for (v1, v2) in [(0.01, 0.02), (1.0, 1.5), (3.0, 4.9)] {
        let (a, b) = (cube_size_from_volume(Some(v1), Bounds::CUBE), cube_size_from_volume(Some(v2), Bounds::CUBE));
        assert!(Bounds::CUBE.contains(a) && Bounds::CUBE.contains(b));
        assert!(a < b);
    }

    // Heights of 0.04 and 0.08 would both clamp to the floor, so the pairs
    // stay inside [0.1, 20] on this footprint.
    let fp = Footprint::new(1.0, 0.25);
    for (v1, v2) in [(0.03, 0.05), (1.0, 1.5), (3.0, 4.9)] {
        let a = height_from_volume(Some(v1), fp, 1.0, Bounds::HEIGHT);
        let b = height_from_volume(Some(v2), fp, 1.0, Bounds::HEIGHT);
        assert!(Bounds::HEIGHT.contains(a) && Bounds::HEIGHT.contains(b));
        assert!(a < b);
    }
}

#[test]
fn no_overlap_within_a_country() {
    let config = LayoutConfig::default();
    for record in [china(), usa()] {
        let layout = layout_country(&record, 0.0, 0.0, &config);
        assert_eq!(layout.shapes.len(), 5);
        let first = &layout.shapes[0];
        assert!(first.leading_edge() >= layout.human.half_width + config.min_spacing - EPS);
        for pair in layout.shapes.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            assert!(next.leading_edge() >= prev.trailing_edge() + config.min_spacing - EPS);
        }
    }
}

#[test]
fn omitted_categories_reserve_nothing() {
    let config = LayoutConfig::default();
    let record = ConsumptionRecord::new("WAT", Volumes::default().with(Category::Water, 5.0));
    let layout = layout_country(&record, 0.0, 0.0, &config);
    assert_eq!(layout.shapes.len(), 1);
    let water = &layout.shapes[0];
    assert_eq!(water.category, Category::Water);
    assert!((water.leading_edge() - 0.55).abs() < EPS);
    assert!((water.dimension - 5.0_f64.cbrt()).abs() < EPS);
}

#[test]
fn no_overlap_across_countries() {
    let config = LayoutConfig::default();
    let empty = ConsumptionRecord::new("NUL", Volumes::default());
    let tiny = ConsumptionRecord::new("TNY", Volumes::default().with(Category::Energy, 0.0001));
    let records = [usa(), china(), empty, tiny];
    let refs: Vec<&ConsumptionRecord> = records.iter().collect();
    let scene = compose_comparison(&refs, &config);
    assert_eq!(scene.mode, SceneMode::Comparison);
    assert_eq!(scene.len(), 4);
    for (i, pair) in scene.countries.windows(2).enumerate() {
        let (a, b) = (&pair[0], &pair[1]);
        let da = country_max_depth(&records[i], &config);
        let db = country_max_depth(&records[i + 1], &config);
        assert_eq!(a.max_depth, da);
        assert!((a.origin.z - b.origin.z).abs() >= 1.0 + da / 2.0 + db / 2.0 - EPS);
        assert!(b.origin.z < a.origin.z);
    }
}

#[test]
fn china_single_mode() {
    let config = LayoutConfig::default();
    let ds = Dataset::new(vec![usa(), china()]);
    let scene = build_scene(&ds, &DisplayMode::Single("CHN".into()), &config);
    assert_eq!(scene.mode, SceneMode::Single);
    assert_eq!(scene.len(), 1);
    let layout = &scene.countries[0];
    assert_eq!(layout.origin.z, 0.0);

    let order: Vec<Category> = layout.shapes.iter().map(|s| s.category).collect();
    assert_eq!(
        order,
        [Category::Food, Category::Waste, Category::Concrete, Category::Energy, Category::Water]
    );
    let mut last_x = layout.human.position.x;
    for s in &layout.shapes {
        assert!(s.position.x > last_x);
        last_x = s.position.x;
    }

    let concrete = layout.shape(Category::Concrete).unwrap();
    assert!((concrete.dimension - 11.36).abs() < EPS);
    let water = layout.shape(Category::Water).unwrap();
    assert!((water.dimension - 4.169).abs() < 1e-3);
}

#[test]
fn comparison_drops_missing_codes() {
    let config = LayoutConfig::default();
    let ds = Dataset::new(vec![usa(), china()]);
    let mode = DisplayMode::Comparison(vec!["USA".into(), "ZZZ".into(), "CHN".into()]);
    let scene = build_scene(&ds, &mode, &config);
    let codes: Vec<&str> = scene.countries.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, ["USA", "CHN"]);
    assert_eq!(scene.mode, SceneMode::Comparison);

    let lonely = build_scene(&ds, &DisplayMode::Comparison(vec!["ZZZ".into(), "CHN".into()]), &config);
    assert_eq!(lonely.mode, SceneMode::Single);
    assert_eq!(lonely.countries[0].origin.z, 0.0);
}

#[test]
fn layouts_are_deterministic_across_threads() {
    let config = LayoutConfig::default();
    let ds = Dataset::new(vec![usa(), china()]);
    let mode = DisplayMode::Comparison(vec!["USA".into(), "CHN".into()]);
    let expected = build_scene(&ds, &mode, &config);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| build_scene(&ds, &mode, &config))).collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

#[test]
fn scene_serializes_for_renderers() {
    let config = LayoutConfig::default();
    let ds = Dataset::new(vec![china()]);
    let scene = build_scene(&ds, &DisplayMode::Single("CHN".into()), &config);
    let json = serde_json::to_value(&scene).unwrap();
    assert_eq!(json["mode"], "single");
    let shapes = json["countries"][0]["shapes"].as_array().unwrap();
    assert_eq!(shapes.len(), 5);
    assert_eq!(shapes[4]["category"], "water");
    assert_eq!(shapes[4]["kind"], "cube");
    assert_eq!(shapes[2]["footprint"]["width"], 1.0);
}

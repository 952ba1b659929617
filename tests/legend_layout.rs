use color_legend::scale::{BinnedScale, ColorScale, ContinuousScale, NominalScale};
use color_legend::style::{BLACK, Rgba, WHITE};
use color_legend::viz::axis::LinearAxis;
use color_legend::viz::{self, LegendConfig, Primitive, Scene};
use float_cmp::assert_approx_eq;

fn blues() -> Vec<Rgba> {
    vec![
        Rgba::rgb(239, 243, 255),
        Rgba::rgb(107, 174, 214),
        Rgba::rgb(8, 81, 156),
    ]
}

/// (x, width, fill, stroke) of every rect in the colorbar.
fn rects(spec: &viz::LegendSpec) -> Vec<(f64, f64, Rgba, Option<Rgba>)> {
    spec.colorbar
        .children
        .iter()
        .filter_map(|p| match p {
            Primitive::Rect {
                x,
                width,
                fill,
                stroke,
                ..
            } => Some((*x, *width, *fill, *stroke)),
            _ => None,
        })
        .collect()
}

#[test]
fn binned_thresholds_make_one_rect_per_segment() {
    let scale = BinnedScale::threshold((0.0, 100.0), vec![25.0, 75.0], blues()).unwrap();
    let expected_fills = [scale.color(12.5), scale.color(50.0), scale.color(87.5)];
    let scale: ColorScale = scale.into();

    let spec = viz::build_legend(220, 50, &scale, &LegendConfig::default()).unwrap();
    let r = rects(&spec);
    assert_eq!(r.len(), 3);
    assert_eq!((r[0].0, r[0].1), (0.0, 50.0));
    assert_eq!((r[1].0, r[1].1), (50.0, 100.0));
    assert_eq!((r[2].0, r[2].1), (150.0, 50.0));
    let fills: Vec<Rgba> = r.iter().map(|x| x.2).collect();
    assert_eq!(fills, expected_fills);
    assert_eq!(fills, blues());

    let values: Vec<f64> = spec.ticks.iter().filter_map(|t| t.value).collect();
    assert_eq!(values, vec![0.0, 25.0, 75.0, 100.0]);
    let labels: Vec<&str> = spec.ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["0.0", "25", "75", "100"]);
}

#[test]
fn quantize_with_k_thresholds_draws_k_plus_one() {
    let colors: Vec<Rgba> = (0..5).map(|i| Rgba::rgb(i * 50, 0, 0)).collect();
    let scale: ColorScale = BinnedScale::quantize((-1.0, 1.0), colors).unwrap().into();
    let spec = viz::build_legend(220, 50, &scale, &LegendConfig::default()).unwrap();
    assert_eq!(spec.swatch_count(), 5);
    assert_eq!(spec.ticks.len(), 6);
    let total: f64 = rects(&spec).iter().map(|r| r.1).sum();
    assert_approx_eq!(f64, total, 200.0, epsilon = 1e-9);
}

#[test]
fn binned_labels_round_half_up() {
    let colors: Vec<Rgba> = (0..4).map(|i| Rgba::rgb(i * 60, 0, 0)).collect();
    let scale: ColorScale = BinnedScale::quantize((0.0, 2500.0), colors).unwrap().into();
    let spec = viz::build_legend(220, 50, &scale, &LegendConfig::default()).unwrap();
    let values: Vec<f64> = spec.ticks.iter().filter_map(|t| t.value).collect();
    assert_eq!(values, vec![0.0, 625.0, 1250.0, 1875.0, 2500.0]);
    let labels: Vec<&str> = spec.ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["0.0", "630", "1.3k", "1.9k", "2.5k"]);
}

#[test]
fn geometry_example() {
    let scale: ColorScale = ContinuousScale::linear(0.0, 1.0, BLACK, WHITE)
        .unwrap()
        .into();
    let spec = viz::build_legend(220, 50, &scale, &LegendConfig::default()).unwrap();
    assert_eq!(spec.geometry.bar_width, 200.0);
    assert_eq!(spec.geometry.bar_height, 24.0);
    assert_eq!(spec.colorbar.translate, (10.0, 2.0));
    assert_eq!(spec.axis.translate, (10.0, 31.0));
}

#[test]
fn continuous_swatch_count_is_ceil_of_width_over_step() {
    let scale: ColorScale = ContinuousScale::linear(0.0, 1.0, BLACK, WHITE)
        .unwrap()
        .into();
    for (step, expected) in [(40.0, 5), (30.0, 7), (200.0, 1), (7.0, 29)] {
        let config = LegendConfig {
            continuous_step_pixels: step,
            ..LegendConfig::default()
        };
        let spec = viz::build_legend(220, 50, &scale, &config).unwrap();
        assert_eq!(spec.swatch_count(), expected, "step {step}");
        for (i, r) in rects(&spec).iter().enumerate() {
            assert_approx_eq!(f64, r.0, i as f64 * step);
            assert_eq!(r.1, step);
        }
    }
}

#[test]
fn continuous_fills_follow_inverted_centers_and_clamp() {
    let inner = ContinuousScale::linear(0.0, 100.0, BLACK, WHITE).unwrap();
    let scale: ColorScale = inner.clone().into();
    let config = LegendConfig {
        domain_extend_fraction: 0.5,
        ..LegendConfig::default()
    };
    let spec = viz::build_legend(220, 50, &scale, &config).unwrap();
    assert_eq!(spec.axis_domain, Some((-50.0, 150.0)));

    let axis = LinearAxis::new((-50.0, 150.0), (0.0, 200.0));
    let r = rects(&spec);
    assert_eq!(r.len(), 5);
    for (x, width, fill, stroke) in r {
        let v = axis.invert(x + width / 2.0);
        if v < 0.0 {
            assert_eq!(fill, BLACK);
            assert_eq!(stroke, None);
        } else if v < 100.0 {
            assert_eq!(fill, inner.color(v));
            assert_eq!(stroke, Some(WHITE));
        } else {
            assert_eq!(fill, WHITE);
            assert_eq!(stroke, None);
        }
    }
    // centers 20/60/100/140/180 px → -30, 10, 50, 90, 130
    let strokes: Vec<bool> = rects(&spec).iter().map(|r| r.3.is_some()).collect();
    assert_eq!(strokes, vec![false, true, true, true, false]);
}

#[test]
fn nice_axis_rounds_outward_and_clamps() {
    let scale: ColorScale = ContinuousScale::linear(3.0, 97.0, BLACK, WHITE)
        .unwrap()
        .into();
    let config = LegendConfig {
        nice: true,
        continuous_step_pixels: 4.0,
        ..LegendConfig::default()
    };
    let spec = viz::build_legend(220, 50, &scale, &config).unwrap();
    assert_eq!(spec.axis_domain, Some((0.0, 100.0)));
    let r = rects(&spec);
    // first swatch center 2px → 1.0, below the true minimum
    assert_eq!(r[0].2, BLACK);
    assert_eq!(r[0].3, None);
    assert_eq!(r.last().unwrap().2, WHITE);
}

#[test]
fn nominal_bands_are_sorted_and_equal_width() {
    let colors = vec![
        Rgba::rgb(255, 0, 0),
        Rgba::rgb(0, 255, 0),
        Rgba::rgb(0, 0, 255),
    ];
    let scale = NominalScale::new(vec!["c".into(), "a".into(), "b".into()], colors).unwrap();
    let expected: Vec<Rgba> = ["a", "b", "c"]
        .iter()
        .map(|l| scale.color(l).unwrap())
        .collect();
    let scale: ColorScale = scale.into();

    let spec = viz::build_legend(220, 50, &scale, &LegendConfig::default()).unwrap();
    let r = rects(&spec);
    assert_eq!(r.len(), 3);
    let step = 200.0 / 3.05;
    for (x, width, _, _) in &r {
        assert_approx_eq!(f64, *width, step * 0.95, epsilon = 1e-9);
        assert!(*x >= 0.0 && x + width <= 200.0);
    }
    assert!(r[0].0 < r[1].0 && r[1].0 < r[2].0);
    let fills: Vec<Rgba> = r.iter().map(|x| x.2).collect();
    assert_eq!(fills, expected);

    let labels: Vec<&str> = spec.ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["a", "b", "c"]);
    assert_approx_eq!(f64, spec.ticks[1].position, 100.0, epsilon = 1e-9);
    assert_eq!(spec.axis_domain, None);
}

#[test]
fn degenerate_domain_renders_single_full_width_swatch() {
    let scale: ColorScale = ContinuousScale::new(
        vec![5.0, 5.0],
        vec![BLACK, WHITE],
        Default::default(),
    )
    .unwrap()
    .into();
    let config = LegendConfig {
        domain_extend_fraction: 0.2,
        ..LegendConfig::default()
    };
    let spec = viz::build_legend(220, 50, &scale, &config).unwrap();
    let r = rects(&spec);
    assert_eq!(r.len(), 1);
    assert_eq!((r[0].0, r[0].1), (0.0, 200.0));
    assert_eq!(spec.ticks.len(), 1);
    assert_eq!(spec.ticks[0].position, 100.0);
    assert_eq!(spec.ticks[0].label, "5.0");

    let binned: ColorScale = BinnedScale::quantize((2.0, 2.0), blues()).unwrap().into();
    let spec = viz::build_legend(220, 50, &binned, &LegendConfig::default()).unwrap();
    assert_eq!(spec.swatch_count(), 1);
}

#[test]
fn rendering_twice_accumulates() {
    let scale: ColorScale = BinnedScale::threshold((0.0, 100.0), vec![25.0, 75.0], blues())
        .unwrap()
        .into();
    let mut scene = Scene::new(220, 50);
    viz::render(&mut scene, &scale, &LegendConfig::default()).unwrap();
    let once = scene.primitive_count();
    assert_eq!(scene.groups.len(), 2);
    assert_eq!(scene.groups[0].class, viz::COLORBAR_CLASS);
    assert_eq!(scene.groups[1].class, viz::AXIS_CLASS);

    viz::render(&mut scene, &scale, &LegendConfig::default()).unwrap();
    assert_eq!(scene.groups.len(), 4);
    assert_eq!(scene.primitive_count(), 2 * once);

    scene.clear();
    assert_eq!(scene.primitive_count(), 0);
}

#[test]
fn invalid_config_is_rejected() {
    let scale: ColorScale = ContinuousScale::linear(0.0, 1.0, BLACK, WHITE)
        .unwrap()
        .into();
    let config = LegendConfig {
        continuous_step_pixels: 0.0,
        ..LegendConfig::default()
    };
    assert!(matches!(
        viz::build_legend(220, 50, &scale, &config),
        Err(color_legend::LegendError::InvalidConfig(_))
    ));
}

use metamorpher_core::{
    MetaMorpher, MorphError, MorpherConfig, PlaybackMode, ScalarInterpolation, Ticker, Transform,
    TransformInterpolation,
};

/// it should drive every attached morpher once per frame
#[test]
fn ticker_drives_independent_morphers() {
    let mut spin = MetaMorpher::with_config(
        Transform::IDENTITY,
        TransformInterpolation,
        MorpherConfig::with_mode(PlaybackMode::Once),
    )
    .unwrap();
    spin.add(Transform::IDENTITY, 0.0).unwrap();
    spin.add(Transform::from_translation([4.0, 0.0, 0.0]), 40.0).unwrap();

    let mut fade = MetaMorpher::new(1.0f32, ScalarInterpolation);
    fade.add(1.0, 0.0).unwrap();
    fade.add(0.0, 20.0).unwrap();

    let spin_out = spin.object();
    let fade_out = fade.object();
    let mut ticker = Ticker::new();
    ticker.attach(Box::new(spin));
    ticker.attach(Box::new(fade));

    ticker.tick(10.0).unwrap();
    assert_eq!(spin_out.read().translation, [1.0, 0.0, 0.0]);
    assert_eq!(fade_out.snapshot(), 0.5);

    for _ in 0..3 {
        ticker.tick(10.0).unwrap();
    }
    assert_eq!(ticker.frame(), 4);
    assert_eq!(spin_out.read().translation, [4.0, 0.0, 0.0]);
    assert_eq!(fade_out.snapshot(), 1.0);
}

/// it should surface a failing morpher with its listener id
#[test]
fn ticker_reports_failing_morpher() {
    let mut lonely = MetaMorpher::new(0.0f32, ScalarInterpolation);
    lonely.add(1.0, 0.0).unwrap();

    let mut ticker = Ticker::new();
    let id = ticker.attach(Box::new(lonely));
    let err = ticker.tick(16.0).unwrap_err();
    assert_eq!(err.category(), "configuration");
    match err {
        MorphError::Listener { id: failed, source } => {
            assert_eq!(failed, id);
            assert_eq!(*source, MorphError::NotEnoughKeyframes { count: 1 });
        }
        other => panic!("unexpected error {other:?}"),
    }
}

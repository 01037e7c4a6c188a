use strata_noise::JavaRandom;

#[test]
fn next_int_sequence() {
    let mut r = JavaRandom::new(12345);
    let expect = [
        1553932502, -2090749135, -287790814, -355989640, -716867186, 161804169, 1402202751,
        535445604, 1011567003, 151766778,
    ];
    for e in expect {
        assert_eq!(r.next_int(), e);
    }
}

#[test]
fn bounded_sequences() {
    let cases: [(i32, [i32; 10]); 12] = [
        (2, [0, 1, 1, 1, 1, 0, 0, 0, 0, 0]),
        (3, [1, 1, 0, 0, 1, 1, 1, 0, 1, 0]),
        (5, [1, 0, 1, 3, 0, 4, 0, 2, 1, 4]),
        (7, [5, 2, 4, 6, 2, 4, 2, 4, 6, 1]),
        (10, [1, 0, 1, 8, 5, 4, 5, 2, 1, 9]),
        (16, [5, 8, 14, 14, 13, 0, 5, 1, 3, 0]),
        (32, [11, 16, 29, 29, 26, 1, 10, 3, 7, 1]),
        (64, [23, 32, 59, 58, 53, 2, 20, 7, 15, 2]),
        (100, [51, 80, 41, 28, 55, 84, 75, 2, 1, 89]),
        (128, [46, 65, 119, 117, 106, 4, 41, 15, 30, 4]),
        (256, [92, 131, 238, 234, 213, 9, 83, 31, 60, 9]),
        (1000, [251, 80, 241, 828, 55, 84, 375, 802, 501, 389]),
    ];
    for (bound, expect) in cases {
        let mut r = JavaRandom::new(12345);
        let got: Vec<i32> = (0..10).map(|_| r.next_bounded_int(bound)).collect();
        assert_eq!(got, expect, "bound {bound}");
    }
}

#[test]
fn float_and_double_sequences() {
    let mut r = JavaRandom::new(12345);
    let floats = [0.36180305f32, 0.5132095, 0.9329935, 0.9171147, 0.8330913];
    for f in floats {
        assert!((r.next_float() - f).abs() <= 1e-7);
    }
    let mut r = JavaRandom::new(12345);
    let doubles = [
        0.3618031071604718,
        0.932993485288541,
        0.8330913489710237,
        0.32647575623792624,
        0.2355237906476252,
    ];
    for d in doubles {
        assert!((r.next_double() - d).abs() <= 1e-15);
    }
}

#[test]
fn long_sequence() {
    let mut r = JavaRandom::new(12345);
    let expect = [
        6674089274190705457i64,
        -1236052134575208584,
        -3078921119283744887,
        6022414958441676900,
        4344647195749500666,
    ];
    for e in expect {
        assert_eq!(r.next_long(), e);
    }
}

#[test]
fn large_bounds_and_bool() {
    let mut r = JavaRandom::new(12345);
    assert_eq!(r.next_bounded_int(i32::MAX), 776966251);
    assert_eq!(r.next_bounded_int(1 << 30), 551054540);
    assert!(r.next_bool());
}

#[test]
fn gaussian_pairs() {
    let mut r = JavaRandom::new(-987654321);
    let expect = [1.5992121924695588, 0.85431819304002, 0.34929132064874824, -0.4466833679845819];
    for e in expect {
        assert!((r.next_gaussian() - e).abs() < 1e-12);
    }
}

#[test]
fn population_seed_mixing() {
    // population re-seed: cx * k + cz * l ^ seed, k and l odd
    let seed = 12345i64;
    let cases = [
        ((0, 0), 12345i64),
        ((1, 0), 6674089274190693128),
        ((0, 1), -1236052134575196352),
        ((1, 1), 5438037139615484563),
        ((-1, 0), -6674089274190693130),
        ((0, -1), 1236052134575196350),
        ((100, 100), 8848135823972686417),
    ];
    for ((cx, cz), expect) in cases {
        let mut r = JavaRandom::new(seed);
        let k = r.next_long() / 2 * 2 + 1;
        let l = r.next_long() / 2 * 2 + 1;
        let mixed = (cx as i64).wrapping_mul(k).wrapping_add((cz as i64).wrapping_mul(l)) ^ seed;
        assert_eq!(mixed, expect, "chunk ({cx},{cz})");
    }
}

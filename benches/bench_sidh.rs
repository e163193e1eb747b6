mod benchmark_sidh {
    use rand_core::OsRng;
    use sidh_harness::engine::SidhEngine;
    use sidh_harness::protocols::sidh_parameters::ParameterSetId;

    use criterion::{Criterion, black_box, criterion_group};
    use std::time::Duration;

    struct Keys {
        private_a: Vec<u8>,
        private_b: Vec<u8>,
        public_a: Vec<u8>,
        public_b: Vec<u8>,
    }

    fn keys(engine: &SidhEngine, id: ParameterSetId) -> Keys {
        let lengths = id.lengths();
        let mut k = Keys {
            private_a: vec![0u8; lengths.private_key_a],
            private_b: vec![0u8; lengths.private_key_b],
            public_a: vec![0u8; lengths.public_key],
            public_b: vec![0u8; lengths.public_key],
        };
        assert!(engine.random_private_key_a(id, &mut k.private_a));
        assert!(engine.random_private_key_b(id, &mut k.private_b));
        assert!(engine.ephemeral_key_generation_a(id, &k.private_a, &mut k.public_a));
        assert!(engine.ephemeral_key_generation_b(id, &k.private_b, &mut k.public_b));
        k
    }

    fn benchmark_keygen(c: &mut Criterion) {
        let engine = SidhEngine::new();
        for id in ParameterSetId::ALL {
            let k = keys(&engine, id);
            let mut public = vec![0u8; id.lengths().public_key];

            let bench_id = format!("Benchmarking Alice Keygen for SIDH {id} Parameters");
            c.bench_function(&bench_id, |b| {
                b.iter(|| engine.ephemeral_key_generation_a(id, black_box(&k.private_a), &mut public))
            });

            let bench_id = format!("Benchmarking Bob Keygen for SIDH {id} Parameters");
            c.bench_function(&bench_id, |b| {
                b.iter(|| engine.ephemeral_key_generation_b(id, black_box(&k.private_b), &mut public))
            });
        }
    }

    fn benchmark_secret(c: &mut Criterion) {
        let engine = SidhEngine::new();
        for id in ParameterSetId::ALL {
            let k = keys(&engine, id);
            let mut secret = vec![0u8; id.lengths().shared_secret];

            let bench_id = format!("Benchmarking Alice Secret Generation for SIDH {id} Parameters");
            c.bench_function(&bench_id, |b| {
                b.iter(|| {
                    engine.ephemeral_secret_agreement_a(
                        id,
                        black_box(&k.private_a),
                        black_box(&k.public_b),
                        &mut secret,
                    )
                })
            });

            let bench_id = format!("Benchmarking Bob Secret Generation for SIDH {id} Parameters");
            c.bench_function(&bench_id, |b| {
                b.iter(|| {
                    engine.ephemeral_secret_agreement_b(
                        id,
                        black_box(&k.private_b),
                        black_box(&k.public_a),
                        &mut secret,
                    )
                })
            });
        }
    }

    fn benchmark_private_keys(c: &mut Criterion) {
        let engine = SidhEngine::new();
        let id = ParameterSetId::P434;
        let mut out = vec![0u8; id.lengths().private_key_b];
        let mut rng = OsRng;
        c.bench_function("Benchmarking Bob Private Key Sampling for SIDH P434", |b| {
            b.iter(|| engine.random_private_key_b_with_rng(id, &mut rng, &mut out))
        });
    }

    criterion_group! {
        name = sidh_benchmarks;
        config = Criterion::default().measurement_time(Duration::from_secs(3));
        targets = benchmark_keygen, benchmark_secret, benchmark_private_keys
    }
}

fn main() {
    benchmark_sidh::sidh_benchmarks();
}

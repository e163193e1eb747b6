use std::hint::black_box;
use std::time::{Duration, Instant};

use fp2::traits::Fp as FqTrait;
use rand_core::OsRng;

use super::config::HarnessConfig;
use super::log::LogSink;
use super::selection::TestCategory;
use crate::elliptic::point::PointX;
use crate::engine::SidhEngine;
use crate::protocols::sidh::SidhParameters;
use crate::protocols::sidh_parameters::{ParameterSetId, p434, p503, p610, p751};

/// What a suite needs from the run.
pub struct SuiteContext<'a> {
    pub engine: &'a SidhEngine,
    pub sink: &'a LogSink,
    pub config: &'a HarnessConfig,
}

/// Call a generic routine with the field type and parameters of a set.
macro_rules! with_instance {
    ($id:expr, $routine:ident($ctx:expr)) => {
        match $id {
            ParameterSetId::P434 => $routine::<p434::Fq>($ctx, p434::parameters()),
            ParameterSetId::P503 => $routine::<p503::Fq>($ctx, p503::parameters()),
            ParameterSetId::P610 => $routine::<p610::Fq>($ctx, p610::parameters()),
            ParameterSetId::P751 => $routine::<p751::Fq>($ctx, p751::parameters()),
        }
    };
}

/// Run the routine of `category` for one parameter set. Returns whether
/// every check in it passed; benchmarks only fail when an operation does.
pub fn run_suite(ctx: &SuiteContext, id: ParameterSetId, category: TestCategory) -> bool {
    match category {
        TestCategory::TestsOnly => with_instance!(id, arithmetic_tests(ctx)),
        TestCategory::Benchmarks => with_instance!(id, arithmetic_benchmarks(ctx)),
        TestCategory::EcIsogenyFunctions => with_instance!(id, isogeny_benchmarks(ctx)),
        TestCategory::DiffieHellman => diffie_hellman(ctx, id),
    }
}

fn verdict(ok: bool) -> &'static str {
    if ok { "PASSED" } else { "FAILED" }
}

/// Average wall time of `f` over `loops` runs.
fn time_average<F: FnMut()>(loops: usize, mut f: F) -> Duration {
    let loops = loops.max(1);
    let start = Instant::now();
    for _ in 0..loops {
        f();
    }
    start.elapsed() / u32::try_from(loops).unwrap_or(u32::MAX)
}

fn arithmetic_tests<Fq: FqTrait>(ctx: &SuiteContext, params: &SidhParameters<Fq>) -> bool {
    let mut field_ok = true;
    for _ in 0..ctx.config.test_loops {
        let a = Fq::rand(&mut OsRng);
        let b = Fq::rand(&mut OsRng);
        if b.is_zero() == u32::MAX {
            continue;
        }

        // (a * b) / b = a
        field_ok &= ((a * b) / b).equals(&a) == u32::MAX;

        // a^2 = a * a
        let a2 = a.square();
        field_ok &= a2.equals(&(a * a)) == u32::MAX;

        // sqrt(a^2)^2 = a^2
        let mut r = a2;
        field_ok &= r.set_sqrt() == u32::MAX;
        field_ok &= r.square().equals(&a2) == u32::MAX;
    }
    ctx.sink.info(format!("  GF(p^2) arithmetic tests ........... {}", verdict(field_ok)));

    // The torsion bases must have full order
    let E0 = SidhParameters::<Fq>::starting_curve();
    let (ea, eb) = (params.ea(), params.eb());
    let mut torsion_ok = true;
    for P in params.two_torsion().to_array() {
        let T: PointX<Fq> = E0.xmul_2e(&P, ea - 1);
        torsion_ok &= T.is_zero() == 0;
        torsion_ok &= E0.xdbl(&T).is_zero() == u32::MAX;
    }
    for P in params.three_torsion().to_array() {
        let T: PointX<Fq> = E0.xmul_3e(&P, eb - 1);
        torsion_ok &= T.is_zero() == 0;
        torsion_ok &= E0.xtpl(&T).is_zero() == u32::MAX;
    }
    for B in [params.two_torsion(), params.three_torsion()] {
        let (xP, xQ, xPQ) = B.x_coords();
        for x in [xP, xQ, xPQ] {
            torsion_ok &= E0.is_on_curve(&x) == u32::MAX;
        }
    }
    // [2^(ea-1)]Q2 = (0, 0)
    let T = E0.xmul_2e(&params.two_torsion().Q, ea - 1);
    torsion_ok &= T.X.is_zero() == u32::MAX;
    ctx.sink.info(format!("  Torsion basis tests ................ {}", verdict(torsion_ok)));

    field_ok && torsion_ok
}

fn arithmetic_benchmarks<Fq: FqTrait>(ctx: &SuiteContext, _params: &SidhParameters<Fq>) -> bool {
    let loops = ctx.config.bench_loops;
    let a = Fq::rand(&mut OsRng);
    let b = Fq::rand(&mut OsRng);

    let t = time_average(loops, || {
        black_box(black_box(a) * black_box(b));
    });
    ctx.sink.info(format!("  GF(p^2) multiplication runs in ..... {t:?}"));

    let t = time_average(loops, || {
        black_box(black_box(a).square());
    });
    ctx.sink.info(format!("  GF(p^2) squaring runs in ........... {t:?}"));

    let t = time_average(loops, || {
        black_box(Fq::ONE / black_box(b));
    });
    ctx.sink.info(format!("  GF(p^2) inversion runs in .......... {t:?}"));

    true
}

fn isogeny_benchmarks<Fq: FqTrait>(ctx: &SuiteContext, params: &SidhParameters<Fq>) -> bool {
    let loops = ctx.config.bench_loops;
    let E0 = SidhParameters::<Fq>::starting_curve();
    let P = params.two_torsion().P;

    let t = time_average(loops, || {
        black_box(E0.xdbl(black_box(&P)));
    });
    ctx.sink.info(format!("  Point doubling runs in ............. {t:?}"));

    let t = time_average(loops, || {
        black_box(E0.xtpl(black_box(&P)));
    });
    ctx.sink.info(format!("  Point tripling runs in ............. {t:?}"));

    let mut scalar = vec![0u8; params.alice_secret_len()];
    params.sample_alice_scalar_into(&mut OsRng, &mut scalar);
    let t = time_average(loops, || {
        black_box(E0.three_point_ladder(params.two_torsion(), &scalar, params.alice_bits()));
    });
    ctx.sink.info(format!("  Three-point ladder runs in ......... {t:?}"));

    // The isogeny walks are the expensive part of key generation
    let mut ok = true;
    let alice = match params.alice_private_key(&scalar) {
        Ok(key) => key,
        Err(_) => return false,
    };
    let t = time_average(loops, || {
        ok &= black_box(alice.public_key(params)).is_ok();
    });
    ctx.sink.info(format!("  2^ea isogeny walk runs in .......... {t:?}"));

    let mut scalar = vec![0u8; params.bob_secret_len()];
    params.sample_bob_scalar_into(&mut OsRng, &mut scalar);
    let bob = match params.bob_private_key(&scalar) {
        Ok(key) => key,
        Err(_) => return false,
    };
    let t = time_average(loops, || {
        ok &= black_box(bob.public_key(params)).is_ok();
    });
    ctx.sink.info(format!("  3^eb isogeny walk runs in .......... {t:?}"));

    ok
}

/// Buffers of one exchange, sized from the catalog.
struct Exchange {
    private_a: Vec<u8>,
    private_b: Vec<u8>,
    public_a: Vec<u8>,
    public_b: Vec<u8>,
    secret_a: Vec<u8>,
    secret_b: Vec<u8>,
}

impl Exchange {
    fn new(id: ParameterSetId) -> Self {
        let lengths = id.lengths();
        Self {
            private_a: vec![0u8; lengths.private_key_a],
            private_b: vec![0u8; lengths.private_key_b],
            public_a: vec![0u8; lengths.public_key],
            public_b: vec![0u8; lengths.public_key],
            secret_a: vec![0u8; lengths.shared_secret],
            secret_b: vec![0u8; lengths.shared_secret],
        }
    }

    /// Run every step, logging each one. Stops at the first failed step.
    fn run(&mut self, engine: &SidhEngine, id: ParameterSetId, sink: &LogSink, round: usize) -> bool {
        let step = |name: &str, ok: bool| {
            let status = if ok { "done" } else { "error" };
            sink.info(format!("  {id} exchange {round}: {name} ... {status}"));
            ok
        };
        step("Alice's private key", engine.random_private_key_a(id, &mut self.private_a))
            && step("Bob's private key", engine.random_private_key_b(id, &mut self.private_b))
            && step(
                "Alice's key generation",
                engine.ephemeral_key_generation_a(id, &self.private_a, &mut self.public_a),
            )
            && step(
                "Bob's key generation",
                engine.ephemeral_key_generation_b(id, &self.private_b, &mut self.public_b),
            )
            && step(
                "Alice's shared key computation",
                engine.ephemeral_secret_agreement_a(
                    id,
                    &self.private_a,
                    &self.public_b,
                    &mut self.secret_a,
                ),
            )
            && step(
                "Bob's shared key computation",
                engine.ephemeral_secret_agreement_b(
                    id,
                    &self.private_b,
                    &self.public_a,
                    &mut self.secret_b,
                ),
            )
    }
}

fn diffie_hellman(ctx: &SuiteContext, id: ParameterSetId) -> bool {
    let mut passed = true;
    let mut last = None;
    for round in 1..=ctx.config.test_loops {
        let mut exchange = Exchange::new(id);
        let ok = exchange.run(ctx.engine, id, ctx.sink, round);
        if !ok || exchange.secret_a != exchange.secret_b {
            tracing::warn!(set = %id, round, "key exchange failed");
            passed = false;
            break;
        }
        last = Some(exchange);
    }
    ctx.sink.info(format!("  Key exchange tests ................. {}", verdict(passed)));

    let Some(mut x) = last else {
        return passed;
    };

    let loops = ctx.config.bench_loops;
    let engine = ctx.engine;
    let mut ok = true;

    let t = time_average(loops, || {
        ok &= engine.ephemeral_key_generation_a(id, &x.private_a, &mut x.public_a);
    });
    ctx.sink.info(format!("  Alice's key generation runs in ..... {t:?}"));

    let t = time_average(loops, || {
        ok &= engine.ephemeral_key_generation_b(id, &x.private_b, &mut x.public_b);
    });
    ctx.sink.info(format!("  Bob's key generation runs in ....... {t:?}"));

    let t = time_average(loops, || {
        ok &= engine.ephemeral_secret_agreement_a(id, &x.private_a, &x.public_b, &mut x.secret_a);
    });
    ctx.sink.info(format!("  Alice's shared key computation runs in ... {t:?}"));

    let t = time_average(loops, || {
        ok &= engine.ephemeral_secret_agreement_b(id, &x.private_b, &x.public_a, &mut x.secret_b);
    });
    ctx.sink.info(format!("  Bob's shared key computation runs in ..... {t:?}"));

    passed && ok
}

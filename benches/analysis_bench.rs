//! Benchmarks for the analysis pipeline
//!
//! Run with: cargo bench

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use health_analytics::analysis::{CorrelationAnalyzer, TrendAnalyzer, TriggerAnalyzer};
use health_analytics::{
    BowelEvent, HealthAnalytics, HealthData, MealEvent, MedicationRecord, SymptomEvent, TimeRange,
};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn create_test_data(days: i64) -> HealthData {
    let mut data = HealthData::default();
    for d in 0..days {
        let day = start() + Duration::days(d);
        data.bowel_movements.push(
            BowelEvent::new((d % 7) as u8 + 1, day + Duration::hours(8))
                .pain((d % 5) as u8 + 1)
                .strain((d % 3) as u8 + 1)
                .satisfaction(7),
        );
        data.meals
            .push(MealEvent::new("Oatmeal", day + Duration::hours(7)).calories(350.0).fiber_rich());
        data.meals.push(
            MealEvent::new("Pizza", day + Duration::hours(21))
                .calories(900.0 + (d % 4) as f64 * 100.0)
                .spicy((d % 10) as u8)
                .dairy()
                .gluten(),
        );
        if d % 2 == 0 {
            data.symptoms.push(SymptomEvent::new(
                "Bloating",
                (d % 9) as u8 + 1,
                day + Duration::hours(23),
            ));
        }
    }
    data.medications
        .push(MedicationRecord::new("Probiotic").started(start() + Duration::days(days / 2)));
    data
}

fn bench_analyzers(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyzers");

    for days in [30, 365] {
        let data = create_test_data(days);
        let range = TimeRange::unbounded();

        group.throughput(Throughput::Elements(days as u64));

        let trends = TrendAnalyzer::default();
        group.bench_function(format!("bowel_trends_{}", days), |b| {
            b.iter(|| trends.bowel_trends(black_box(&data.bowel_movements), &range))
        });

        let correlations = CorrelationAnalyzer::default();
        group.bench_function(format!("meal_correlations_{}", days), |b| {
            b.iter(|| {
                correlations.meal_bowel_correlations(
                    black_box(&data.meals),
                    black_box(&data.bowel_movements),
                )
            })
        });

        let triggers = TriggerAnalyzer::default();
        group.bench_function(format!("triggers_{}", days), |b| {
            b.iter(|| {
                triggers.trigger_analysis(
                    black_box(&data.meals),
                    black_box(&data.symptoms),
                    black_box(&data.bowel_movements),
                )
            })
        });
    }

    group.finish();
}

fn bench_full_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");
    let analytics = HealthAnalytics::default();

    for days in [30, 365] {
        let data = create_test_data(days);

        group.bench_function(format!("analyze_{}", days), |b| {
            b.iter(|| analytics.analyze(black_box(&data), TimeRange::unbounded()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analyzers, bench_full_report);
criterion_main!(benches);

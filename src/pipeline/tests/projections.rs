use std::collections::HashSet;

use super::common::*;
use crate::pipeline::domain::{ApplicationId, ApplicationStatus, JobId};
use crate::pipeline::projections::{
    by_employer, by_job_seeker, by_status_buckets, filtered, pending_vs_reviewed, status_counts,
    CandidateFilters, JobFilter, StatusFilter,
};

fn ids(apps: &[crate::pipeline::domain::JobApplication]) -> HashSet<ApplicationId> {
    apps.iter().map(|app| app.id.clone()).collect()
}

#[test]
fn status_buckets_partition_the_input_set() {
    let apps = fixture_applications();
    let buckets = by_status_buckets(&apps);

    assert_eq!(buckets.total(), apps.len());
    for status in ApplicationStatus::ALL {
        for app in buckets.bucket(status) {
            assert_eq!(app.status, status);
        }
    }

    let mut union = ids(&buckets.pending);
    union.extend(ids(&buckets.reviewing));
    union.extend(ids(&buckets.accepted));
    union.extend(ids(&buckets.rejected));
    assert_eq!(union, ids(&apps));
}

#[test]
fn empty_buckets_are_materialized_not_absent() {
    let buckets = by_status_buckets(&[]);
    let counts = buckets.counts();
    assert_eq!(counts.pending, 0);
    assert_eq!(counts.reviewing, 0);
    assert_eq!(counts.accepted, 0);
    assert_eq!(counts.rejected, 0);
}

#[test]
fn pending_reviewed_split_partitions_and_matches_buckets() {
    let apps = fixture_applications();
    let split = pending_vs_reviewed(&apps);
    let buckets = by_status_buckets(&apps);

    assert_eq!(split.pending.len() + split.reviewed.len(), apps.len());
    assert!(split
        .pending
        .iter()
        .all(|app| app.status == ApplicationStatus::Pending));
    assert!(split
        .reviewed
        .iter()
        .all(|app| app.status != ApplicationStatus::Pending));

    // Reviewed tab is exactly everything outside the pending bucket.
    let mut non_pending = ids(&buckets.reviewing);
    non_pending.extend(ids(&buckets.accepted));
    non_pending.extend(ids(&buckets.rejected));
    assert_eq!(ids(&split.reviewed), non_pending);
    assert_eq!(ids(&split.pending), ids(&buckets.pending));
}

#[test]
fn seeker_projection_returns_only_their_applications() {
    let apps = fixture_applications();
    let mine = by_job_seeker(&apps, "seeker-1");
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|app| app.job_seeker_id == "seeker-1"));

    let counts = status_counts(&mine);
    assert_eq!(counts.pending, 1);
    assert_eq!(counts.accepted, 1);
}

#[test]
fn employer_projection_never_leaks_other_employers_candidates() {
    let apps = fixture_applications();
    let all_listings = listings();
    let owned_by_a: Vec<_> = all_listings
        .iter()
        .filter(|listing| listing.employer_id == EMPLOYER_A)
        .cloned()
        .collect();
    let owned_by_b: Vec<_> = all_listings
        .iter()
        .filter(|listing| listing.employer_id == EMPLOYER_B)
        .cloned()
        .collect();

    let for_a = by_employer(&apps, &owned_by_a);
    let for_b = by_employer(&apps, &owned_by_b);

    assert_eq!(for_a.len(), 3);
    assert_eq!(for_b.len(), 1);
    assert!(ids(&for_a).is_disjoint(&ids(&for_b)));
    assert_eq!(for_b[0].id, ApplicationId("app-4".to_string()));
}

#[test]
fn search_matches_name_or_cover_letter_case_insensitively() {
    let apps = fixture_applications();
    let filters = CandidateFilters {
        search_term: "react".to_string(),
        status_filter: StatusFilter::All,
        job_filter: JobFilter::All,
    };

    let matches = filtered(&apps, &filters);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, ApplicationId("app-1".to_string()));

    let by_name = filtered(
        &apps,
        &CandidateFilters {
            search_term: "JANE".to_string(),
            ..Default::default()
        },
    );
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].applicant_name, "Jane Smith");
}

#[test]
fn empty_search_passes_every_application() {
    let apps = fixture_applications();
    let matches = filtered(&apps, &CandidateFilters::default());
    assert_eq!(matches.len(), apps.len());
}

#[test]
fn all_three_filter_predicates_are_anded() {
    let apps = fixture_applications();
    let filters = CandidateFilters {
        search_term: "doe".to_string(),
        status_filter: StatusFilter::Only(ApplicationStatus::Accepted),
        job_filter: JobFilter::Only(JobId("job-a2".to_string())),
    };
    let matches = filtered(&apps, &filters);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, ApplicationId("app-3".to_string()));

    // Same search but wrong job: no hits.
    let filters = CandidateFilters {
        search_term: "doe".to_string(),
        status_filter: StatusFilter::Only(ApplicationStatus::Accepted),
        job_filter: JobFilter::Only(JobId("job-a1".to_string())),
    };
    assert!(filtered(&apps, &filters).is_empty());
}

#[test]
fn status_filter_parsing_accepts_all_and_labels() {
    assert_eq!(StatusFilter::parse("all"), Some(StatusFilter::All));
    assert_eq!(StatusFilter::parse(""), Some(StatusFilter::All));
    assert_eq!(
        StatusFilter::parse("reviewing"),
        Some(StatusFilter::Only(ApplicationStatus::Reviewing))
    );
    assert_eq!(StatusFilter::parse("archived"), None);
}

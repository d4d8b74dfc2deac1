// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidName(String::from("test"));
    assert_eq!(format!("{err}"), "Invalid name: test");

    let err: DomainError = DomainError::InvalidDescription(String::from("too long"));
    assert_eq!(format!("{err}"), "Invalid description: too long");

    let err: DomainError = DomainError::InvalidTenderStatus {
        status: String::from("Open"),
    };
    assert_eq!(
        format!("{err}"),
        "Invalid tender status 'Open': expected Created, Published or Closed"
    );

    let err: DomainError = DomainError::InvalidBidStatus {
        status: String::from("Won"),
    };
    assert_eq!(
        format!("{err}"),
        "Invalid bid status 'Won': expected Created, Published or Canceled"
    );

    let err: DomainError = DomainError::InvalidDecision(String::from("Maybe"));
    assert_eq!(
        format!("{err}"),
        "Invalid decision 'Maybe': expected Approved or Rejected"
    );

    let err: DomainError = DomainError::InvalidVersion(0);
    assert_eq!(format!("{err}"), "Invalid version 0: versions start at 1");
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> =
        Box::new(DomainError::InvalidAuthorType(String::from("robot")));
    assert_eq!(
        err.to_string(),
        "Invalid author type 'robot': expected Organization or User"
    );
}
